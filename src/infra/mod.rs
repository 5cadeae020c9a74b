//! Инфраструктурный слой вокруг клиентского ядра:
//! маппинги между протоколом (api) и domain.

pub mod mapping;

pub use mapping::*;
