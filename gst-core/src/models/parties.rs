use serde::{Deserialize, Serialize};

/// The seller printed at the top of every invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyDetails {
    pub name: String,
    pub address: String,
    pub gstin: String,
    pub state: String,
    pub contact: String,
    pub email: String,
}

impl Default for CompanyDetails {
    fn default() -> Self {
        Self {
            name: "Manorma Industries".to_string(),
            address: "M-92, MIDC Nangaon Peth Amravati".to_string(),
            gstin: "27DXBPB6351N1ZA".to_string(),
            state: "Maharashtra, Code: 27".to_string(),
            contact: "8975575369".to_string(),
            email: "manoramaindutry@gmail.com".to_string(),
        }
    }
}

/// Buyer (bill to). The consignee (ship to) is the same party.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuyerDetails {
    pub name: String,
    pub address: String,
    pub district: String,
    pub gstin: String,
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankDetails {
    pub bank_name: String,
    pub branch: String,
    pub ifsc: String,
    pub account_no: String,
}

impl Default for BankDetails {
    fn default() -> Self {
        Self {
            bank_name: "UCO Bank".to_string(),
            branch: String::new(),
            ifsc: String::new(),
            account_no: String::new(),
        }
    }
}
