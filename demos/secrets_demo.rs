// Copyright (c) 2025 ADBC Drivers Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Creates a secret scope, stores a secret, lists it and removes the scope.
//!
//! ```bash
//! RUST_LOG=databricks_rest=debug cargo run --example secrets_demo -- https://my-workspace.cloud.databricks.com dapi...
//! ```

use databricks_rest::types::secrets::{SecretScope, SecretValue};
use databricks_rest::{ClientConfig, DatabricksClient};

#[tokio::main]
async fn main() {
    let mut args = std::env::args().skip(1);
    let mut config = ClientConfig::from_env();
    if let Some(host) = args.next() {
        config = config.with_host(host);
    }
    if let Some(token) = args.next() {
        config = config.with_token(token);
    }
    let client = DatabricksClient::new(&config).expect("Failed to create client");
    let secrets = client.secrets();

    let scope = SecretScope::Databricks {
        name: format!("databricks-rest-demo-{}", std::process::id()),
    };
    secrets
        .create_scope(&scope, Some("users".to_string()))
        .await
        .expect("Failed to create scope");
    println!("Created scope {}", scope.name());

    secrets
        .put_secret(
            scope.name(),
            "greeting",
            SecretValue::String("hello".to_string()),
        )
        .await
        .expect("Failed to put secret");
    secrets
        .put_secret(scope.name(), "blob", SecretValue::Bytes(vec![0xde, 0xad]))
        .await
        .expect("Failed to put secret");

    for secret in secrets
        .list_secrets(scope.name())
        .await
        .expect("Failed to list secrets")
    {
        println!("  {} (updated {:?})", secret.key, secret.last_updated_timestamp);
    }

    secrets
        .delete_scope(scope.name())
        .await
        .expect("Failed to delete scope");
    println!("Deleted scope {}", scope.name());
}
