use serde::{Deserialize, Serialize};

/// Column headers of the tabular export, in output order.
pub const EXPORT_COLUMNS: [&str; 11] = [
    "Company Name",
    "Activity Category",
    "Products",
    "Country",
    "Address",
    "Website",
    "Email",
    "LinkedIn",
    "Twitter",
    "Facebook",
    "Instagram",
];

/// One exhibitor as accumulated during a run.
///
/// Every field is always present. Missing keys in a snapshot deserialize to
/// empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhibitorRecord {
    #[serde(rename = "Company Name")]
    pub company: String,
    #[serde(rename = "Activity Category")]
    pub category: String,
    #[serde(rename = "Products")]
    pub products: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "Website")]
    pub website: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "LinkedIn")]
    pub linkedin: String,
    #[serde(rename = "Twitter")]
    pub twitter: String,
    #[serde(rename = "Facebook")]
    pub facebook: String,
    #[serde(rename = "Instagram")]
    pub instagram: String,
    /// Only meaningful while scraping; not exported.
    pub profile_url: String,
}

impl ExhibitorRecord {
    /// Projects the record onto `EXPORT_COLUMNS`. The profile URL is dropped.
    pub fn export_row(&self) -> [&str; 11] {
        [
            self.company.as_str(),
            self.category.as_str(),
            self.products.as_str(),
            self.country.as_str(),
            self.address.as_str(),
            self.website.as_str(),
            self.email.as_str(),
            self.linkedin.as_str(),
            self.twitter.as_str(),
            self.facebook.as_str(),
            self.instagram.as_str(),
        ]
    }

    pub fn has_profile(&self) -> bool {
        !self.profile_url.is_empty()
    }

    /// Overwrites the detail fields with the patch.
    pub fn apply(&mut self, patch: FieldPatch) {
        self.website = patch.website;
        self.email = patch.email;
        self.products = patch.products;
        self.linkedin = patch.linkedin;
        self.twitter = patch.twitter;
        self.facebook = patch.facebook;
        self.instagram = patch.instagram;
    }
}

/// Fields recovered from a profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPatch {
    pub website: String,
    pub email: String,
    pub products: String,
    pub linkedin: String,
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
}
