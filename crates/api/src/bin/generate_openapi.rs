//! Writes the OpenAPI document for the swap aggregator API without starting a server.
//!
//! ```bash
//! cargo run -p swap-api --bin generate_openapi --features openapi -- docs/api/openapi.json
//! ```

#[cfg(feature = "openapi")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
	use std::path::Path;
	use swap_api::openapi::ApiDoc;
	use utoipa::OpenApi;

	let output_path = std::env::args()
		.nth(1)
		.unwrap_or_else(|| "docs/api/openapi.json".to_string());

	if let Some(parent) = Path::new(&output_path).parent() {
		std::fs::create_dir_all(parent)?;
	}

	let json = serde_json::to_string_pretty(&ApiDoc::openapi())?;
	std::fs::write(&output_path, json)?;

	println!("✅ OpenAPI specification written to {}", output_path);
	Ok(())
}

#[cfg(not(feature = "openapi"))]
fn main() {
	eprintln!("The 'openapi' feature must be enabled: cargo run --bin generate_openapi --features openapi");
	std::process::exit(1);
}
