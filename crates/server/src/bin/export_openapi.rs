// Export OpenAPI specification as JSON
//
// Usage: cargo run --bin export-openapi > docs/api/openapi.json
//
// Generates the OpenAPI spec without starting the server or touching storage.

use notekeep_server::openapi::ApiDoc;

fn main() {
    println!("{}", ApiDoc::to_json());
}
