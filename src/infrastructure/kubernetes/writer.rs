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

use crate::infrastructure::constants::DEPLOYMENT_OUTPUT_FILE;
use crate::infrastructure::kubernetes::resources::ServiceVisibility;
use crate::shared::error::{RecipeError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Destination for finished recipes.
#[async_trait::async_trait]
pub trait RecipeWriter: Send + Sync {
    /// Persist the workload recipe and return where it went.
    async fn write_deployment(&self, deployment: &Deployment) -> Result<PathBuf>;

    async fn write_service(
        &self,
        service: &Service,
        visibility: ServiceVisibility,
    ) -> Result<PathBuf>;
}

/// Serialize a resource as YAML.
pub fn render_yaml<T: Serialize>(resource: &T) -> Result<String> {
    Ok(serde_yaml::to_string(resource)?)
}

/// Writes recipes as YAML files into one directory.
pub struct FileRecipeWriter {
    output_dir: PathBuf,
}

impl FileRecipeWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    async fn write_yaml<T: Serialize + Sync>(&self, file_name: &str, resource: &T) -> Result<PathBuf> {
        let path = self.output_dir.join(file_name);
        let yaml = render_yaml(resource)?;

        tokio::fs::write(&path, yaml)
            .await
            .map_err(|e| RecipeError::write_error(&path, e))?;

        tracing::debug!(path = %path.display(), "wrote recipe");
        Ok(path)
    }
}

#[async_trait::async_trait]
impl RecipeWriter for FileRecipeWriter {
    async fn write_deployment(&self, deployment: &Deployment) -> Result<PathBuf> {
        self.write_yaml(DEPLOYMENT_OUTPUT_FILE, deployment).await
    }

    async fn write_service(
        &self,
        service: &Service,
        visibility: ServiceVisibility,
    ) -> Result<PathBuf> {
        self.write_yaml(visibility.output_file(), service).await
    }
}
