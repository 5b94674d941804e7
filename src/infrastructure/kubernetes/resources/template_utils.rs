// Copyright 2025 JiangLong.
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

use crate::shared::error::{RecipeError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

/// Load the base Deployment template.
///
/// The template must carry a pod spec with at least one container; only the first one is
/// rewritten by the recipe.
pub async fn load_deployment_template(file_path: impl AsRef<Path>) -> Result<Deployment> {
    let path = resolve_template_path(file_path.as_ref())?;
    let deployment: Deployment = load_template(&path).await?;

    let containers = deployment
        .spec
        .as_ref()
        .and_then(|s| s.template.spec.as_ref())
        .map(|s| s.containers.len())
        .unwrap_or(0);

    if containers == 0 {
        return Err(RecipeError::template_error(
            &path,
            "Deployment template has no container under spec.template.spec.containers",
        ));
    }

    Ok(deployment)
}

/// Load the base Service template.
pub async fn load_service_template(file_path: impl AsRef<Path>) -> Result<Service> {
    let path = resolve_template_path(file_path.as_ref())?;
    let service: Service = load_template(&path).await?;

    if service.spec.is_none() {
        return Err(RecipeError::template_error(
            &path,
            "Service template is missing spec section",
        ));
    }

    Ok(service)
}

async fn load_template<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| RecipeError::template_error(path, format!("failed to read: {}", e)))?;

    // JSON is a subset of YAML, but tab indentation is not, so .json goes through serde_json
    let parsed: std::result::Result<T, String> = if is_json(path) {
        serde_json::from_str(&content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(&content).map_err(|e| e.to_string())
    };

    parsed.map_err(|reason| RecipeError::template_error(path, format!("failed to parse: {}", reason)))
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

pub fn resolve_template_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()
            .map_err(|e| RecipeError::config_error(format!("Cannot get current directory: {}", e)))?
            .join(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const DEPLOYMENT_JSON: &str = r#"{
	"apiVersion": "apps/v1",
	"kind": "Deployment",
	"metadata": {"name": "x", "labels": {"app": "x"}},
	"spec": {
		"selector": {"matchLabels": {"app": "x"}},
		"template": {
			"metadata": {"labels": {"app": "x"}},
			"spec": {"containers": [{"name": "x", "image": "x"}]}
		}
	}
}"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_json_deployment_with_tabs() {
        let file = write_temp(".json", DEPLOYMENT_JSON);
        let deployment = load_deployment_template(file.path()).await.unwrap();
        assert_eq!(deployment.metadata.name.as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn test_load_yaml_service() {
        let file = write_temp(
            ".yaml",
            "apiVersion: v1\nkind: Service\nmetadata:\n  name: s\nspec:\n  type: NodePort\n",
        );
        let service = load_service_template(file.path()).await.unwrap();
        assert_eq!(
            service.spec.unwrap().type_.as_deref(),
            Some("NodePort")
        );
    }

    #[tokio::test]
    async fn test_deployment_without_container_rejected() {
        let file = write_temp(
            ".yaml",
            "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: x\nspec:\n  selector: {}\n  template:\n    spec:\n      containers: []\n",
        );
        let err = load_deployment_template(file.path()).await.unwrap_err();
        assert!(matches!(err, RecipeError::TemplateError { .. }));
    }

    #[tokio::test]
    async fn test_malformed_json_template_is_template_error() {
        let file = write_temp(".json", "{\"apiVersion\": \"apps/v1\",");
        let err = load_deployment_template(file.path()).await.unwrap_err();

        assert!(matches!(err, RecipeError::TemplateError { .. }));
        assert!(err.to_string().contains("failed to parse"));
    }

    #[tokio::test]
    async fn test_missing_template_file() {
        let err = load_service_template("/nonexistent/service.json")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
