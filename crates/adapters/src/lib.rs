//! Swap Adapters
//!
//! Provider-specific adapters for the swap aggregator.

pub mod approvals;
pub mod bebop_adapter;
pub mod http;
pub mod jupiter_adapter;
pub mod kyberswap_adapter;
pub mod oneinch_adapter;
pub mod zerox_adapter;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use bebop_adapter::BebopAdapter;
pub use jupiter_adapter::JupiterAdapter;
pub use kyberswap_adapter::KyberSwapAdapter;
pub use oneinch_adapter::OneInchAdapter;
pub use swap_types::{
	AdapterError, AdapterFactoryError, AdapterFactoryResult, AdapterResult, ProviderAdapter,
	ProviderConfig,
};
pub use zerox_adapter::ZeroXAdapter;

/// Provider ids with a built-in adapter
pub const BUILTIN_PROVIDERS: [&str; 5] = [
	zerox_adapter::ZEROX_ID,
	bebop_adapter::BEBOP_ID,
	oneinch_adapter::ONEINCH_ID,
	kyberswap_adapter::KYBERSWAP_ID,
	jupiter_adapter::JUPITER_ID,
];

/// Factory for creating provider adapters
pub struct AdapterFactory;

impl AdapterFactory {
	/// Default API base URL for a built-in provider
	pub fn default_base_url(provider_id: &str) -> Option<&'static str> {
		match provider_id {
			zerox_adapter::ZEROX_ID => Some(zerox_adapter::ZEROX_DEFAULT_BASE_URL),
			bebop_adapter::BEBOP_ID => Some(bebop_adapter::BEBOP_DEFAULT_BASE_URL),
			oneinch_adapter::ONEINCH_ID => Some(oneinch_adapter::ONEINCH_DEFAULT_BASE_URL),
			kyberswap_adapter::KYBERSWAP_ID => Some(kyberswap_adapter::KYBERSWAP_DEFAULT_BASE_URL),
			jupiter_adapter::JUPITER_ID => Some(jupiter_adapter::JUPITER_DEFAULT_BASE_URL),
			_ => None,
		}
	}

	pub fn create_adapter(
		provider_id: &str,
		config: ProviderConfig,
	) -> AdapterResult<Arc<dyn ProviderAdapter>> {
		match provider_id {
			zerox_adapter::ZEROX_ID => Ok(Arc::new(ZeroXAdapter::new(config)?)),
			bebop_adapter::BEBOP_ID => Ok(Arc::new(BebopAdapter::new(config)?)),
			oneinch_adapter::ONEINCH_ID => Ok(Arc::new(OneInchAdapter::new(config)?)),
			kyberswap_adapter::KYBERSWAP_ID => Ok(Arc::new(KyberSwapAdapter::new(config)?)),
			jupiter_adapter::JUPITER_ID => Ok(Arc::new(JupiterAdapter::new(config)?)),
			_ => Err(AdapterError::UnsupportedAdapter(provider_id.to_string())),
		}
	}

	/// Create adapter using the provider's default endpoint
	pub fn create_with_defaults(provider_id: &str) -> AdapterResult<Arc<dyn ProviderAdapter>> {
		let base_url = Self::default_base_url(provider_id)
			.ok_or_else(|| AdapterError::UnsupportedAdapter(provider_id.to_string()))?;
		Self::create_adapter(provider_id, ProviderConfig::new(base_url))
	}
}

/// Registered adapters keyed by provider id
///
/// Iteration order is the id order, which fixes the order in which quotes
/// are collected and therefore how equal scores are ordered.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
	adapters: BTreeMap<String, Arc<dyn ProviderAdapter>>,
}

impl std::fmt::Debug for AdapterRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AdapterRegistry")
			.field("adapters", &self.ids())
			.finish()
	}
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with every built-in provider on its default endpoint
	pub fn with_defaults() -> AdapterResult<Self> {
		let mut registry = Self::new();
		for id in BUILTIN_PROVIDERS {
			registry.insert(AdapterFactory::create_with_defaults(id)?);
		}
		Ok(registry)
	}

	/// Register an adapter, rejecting duplicate ids
	pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) -> AdapterFactoryResult<()> {
		let id = adapter.id().to_string();
		if self.adapters.contains_key(&id) {
			return Err(AdapterFactoryError::AlreadyRegistered { adapter_id: id });
		}
		self.adapters.insert(id, adapter);
		Ok(())
	}

	/// Register or replace an adapter
	pub fn insert(&mut self, adapter: Arc<dyn ProviderAdapter>) {
		self.adapters.insert(adapter.id().to_string(), adapter);
	}

	pub fn get(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
		self.adapters.get(id).cloned()
	}

	/// Lookup ignoring ASCII case, for ids coming from clients
	pub fn find(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
		self.get(id).or_else(|| {
			self.adapters
				.iter()
				.find(|(key, _)| key.eq_ignore_ascii_case(id))
				.map(|(_, adapter)| adapter.clone())
		})
	}

	pub fn get_all(&self) -> impl Iterator<Item = &Arc<dyn ProviderAdapter>> {
		self.adapters.values()
	}

	pub fn ids(&self) -> Vec<String> {
		self.adapters.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use swap_types::ChainId;

	#[test]
	fn test_factory_creates_every_builtin() {
		for id in BUILTIN_PROVIDERS {
			let adapter = AdapterFactory::create_with_defaults(id).unwrap();
			assert_eq!(adapter.id(), id);
			assert!(!adapter.supported_chains().is_empty());
		}
	}

	#[test]
	fn test_factory_rejects_unknown_provider() {
		let result = AdapterFactory::create_adapter("paraswap", ProviderConfig::new("https://x"));
		assert!(matches!(result, Err(AdapterError::UnsupportedAdapter(_))));
	}

	#[test]
	fn test_registry_is_ordered_by_id() {
		let registry = AdapterRegistry::with_defaults().unwrap();
		assert_eq!(
			registry.ids(),
			vec!["0x", "1inch", "bebop", "jupiter", "kyberswap"]
		);
		assert_eq!(registry.len(), 5);
	}

	#[test]
	fn test_register_rejects_duplicates() {
		let mut registry = AdapterRegistry::new();
		registry
			.register(AdapterFactory::create_with_defaults("0x").unwrap())
			.unwrap();
		let result = registry.register(AdapterFactory::create_with_defaults("0x").unwrap());
		assert!(matches!(
			result,
			Err(AdapterFactoryError::AlreadyRegistered { .. })
		));
	}

	#[test]
	fn test_find_ignores_case() {
		let registry = AdapterRegistry::with_defaults().unwrap();
		assert_eq!(registry.find("Jupiter").unwrap().id(), "jupiter");
		assert!(registry.find("paraswap").is_none());
	}

	#[test]
	fn test_only_jupiter_serves_solana() {
		let registry = AdapterRegistry::with_defaults().unwrap();
		let solana: Vec<_> = registry
			.get_all()
			.filter(|adapter| adapter.supports_chain(ChainId::Solana))
			.map(|adapter| adapter.id().to_string())
			.collect();
		assert_eq!(solana, vec!["jupiter"]);
	}
}
