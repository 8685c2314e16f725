mod invoice;
mod line_item;
mod parties;

pub use invoice::{DEFAULT_TERMS, InvoiceData, InvoiceHeader};
pub use line_item::{DEFAULT_GST_RATE, DEFAULT_UNIT, InvoiceItem, LineItem, Priced};
pub use parties::{BankDetails, BuyerDetails, CompanyDetails};
