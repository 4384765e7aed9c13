pub mod ledger_service;
pub mod metrics_service;
pub mod trade_service;
