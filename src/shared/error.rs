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

use std::path::{Path, PathBuf};
use thiserror::Error;
pub type Result<T> = std::result::Result<T, RecipeError>;

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Template error in '{path}': {reason}")]
    TemplateError { path: PathBuf, reason: String },

    #[error("Invalid resource: {0}")]
    InvalidResource(String),

    #[error("Failed to write recipe '{path}': {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl RecipeError {
    pub fn config_error(context: impl Into<String>) -> Self {
        Self::ConfigError(context.into())
    }

    pub fn template_error(path: impl AsRef<Path>, reason: impl Into<String>) -> Self {
        Self::TemplateError {
            path: path.as_ref().to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn write_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
