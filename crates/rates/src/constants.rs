//! Names of the built-in services as registered in the default registry.

pub const SERVICE_CENTRAL_BANK_OF_CZECH_REPUBLIC: &str = "central_bank_of_czech_republic";
pub const SERVICE_CENTRAL_BANK_OF_REPUBLIC_TURKEY: &str = "central_bank_of_republic_turkey";
pub const SERVICE_CURRENCY_DATA_FEED: &str = "currency_data_feed";
pub const SERVICE_CURRENCY_LAYER: &str = "currency_layer";
pub const SERVICE_EUROPEAN_CENTRAL_BANK: &str = "european_central_bank";
pub const SERVICE_FIXER: &str = "fixer";
pub const SERVICE_FORGE: &str = "forge";
pub const SERVICE_NATIONAL_BANK_OF_ROMANIA: &str = "national_bank_of_romania";
pub const SERVICE_OPEN_EXCHANGE_RATES: &str = "open_exchange_rates";
pub const SERVICE_ARRAY: &str = "array";
pub const SERVICE_WEBSERVICEX: &str = "webservicex";
pub const SERVICE_XIGNITE: &str = "xignite";
pub const SERVICE_RUSSIAN_CENTRAL_BANK: &str = "russian_central_bank";
pub const SERVICE_CRYPTONATOR: &str = "cryptonator";
pub const SERVICE_XCHANGEAPI: &str = "xchangeapi";
