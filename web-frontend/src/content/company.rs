pub struct CompanyProfile {
    pub mission: &'static str,
    pub story: &'static [&'static str],
    pub values: &'static [(&'static str, &'static str)],
    pub email: &'static str,
    pub phone: &'static str,
    pub location: &'static str,
}

pub static COMPANY: CompanyProfile = CompanyProfile {
    mission: "Help growing businesses in East Africa and beyond build and run great software.",
    story: &[
        "We started as a two-person studio building websites for local businesses.",
        "Today we are a team of engineers, designers and trainers delivering products for clients across three continents, and running an academy that trains the next generation of developers.",
    ],
    values: &[
        ("Craft", "We sweat the details that users notice and the ones they never will."),
        ("Candour", "Clear estimates, honest trade-offs, no surprises on the invoice."),
        ("Growth", "We teach what we know, to clients and to each other."),
    ],
    email: "hello@nexadigital.example",
    phone: "+254 700 000 000",
    location: "Nairobi, Kenya",
};
