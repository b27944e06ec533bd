//! Column names found in lead exports, and the derived columns the
//! cleaner adds.

pub const FIRST_NAME: &str = "FIRST_NAME";
pub const LAST_NAME: &str = "LAST_NAME";

pub const PERSONAL_ADDRESS: &str = "PERSONAL_ADDRESS";
pub const PERSONAL_CITY: &str = "PERSONAL_CITY";
pub const PERSONAL_STATE: &str = "PERSONAL_STATE";
pub const PERSONAL_ZIP: &str = "PERSONAL_ZIP";

pub const HOMEOWNER: &str = "HOMEOWNER";
pub const NET_WORTH: &str = "NET_WORTH";
pub const INCOME_RANGE: &str = "INCOME_RANGE";
pub const CHILDREN: &str = "CHILDREN";
pub const AGE_RANGE: &str = "AGE_RANGE";
pub const SKIPTRACE_CREDIT_RATING: &str = "SKIPTRACE_CREDIT_RATING";

pub const MOBILE_PHONE: &str = "MOBILE_PHONE";
pub const DIRECT_NUMBER: &str = "DIRECT_NUMBER";
/// Do-not-call flag; `Y` means the lead must not be dialed.
pub const DNC: &str = "DNC";

pub const PERSONAL_EMAIL: &str = "PERSONAL_EMAIL";
pub const BUSINESS_EMAIL: &str = "BUSINESS_EMAIL";
pub const SHA256_PERSONAL_EMAIL: &str = "SHA256_PERSONAL_EMAIL";
pub const SHA256_BUSINESS_EMAIL: &str = "SHA256_BUSINESS_EMAIL";

pub const LINKEDIN_URL: &str = "LINKEDIN_URL";

// Derived columns.

pub const PERSONAL_ADDRESS_CLEAN: &str = "PERSONAL_ADDRESS_CLEAN";
pub const ADDRESS: &str = "ADDRESS";
pub const DATA: &str = "DATA";
pub const FULL_ADDRESS: &str = "FULL_ADDRESS";
pub const PHONE: &str = "PHONE";
pub const SHA256: &str = "SHA256";
pub const DUPLICATE_COUNT: &str = "DUPLICATE_COUNT";
