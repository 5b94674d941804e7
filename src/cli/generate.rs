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

use crate::cli::display::TableRenderer;
use crate::domain::config::{parse_properties, RecipeInputs};
use crate::domain::recipe::{RecipeDescriptor, TemplatePaths};
use crate::infrastructure::constants::{
    DEFAULT_DEPLOYMENT_TEMPLATE, DEFAULT_OUTPUT_DIR, DEFAULT_SERVICE_TEMPLATE,
};
use crate::infrastructure::kubernetes::FileRecipeWriter;
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
pub struct GenerateCommand {
    /// Base Deployment template (JSON or YAML)
    #[arg(long, env = "RECIPE_DEPLOYMENT_TEMPLATE", default_value = DEFAULT_DEPLOYMENT_TEMPLATE)]
    pub deployment_template: PathBuf,

    /// Base Service template (JSON or YAML)
    #[arg(long, env = "RECIPE_SERVICE_TEMPLATE", default_value = DEFAULT_SERVICE_TEMPLATE)]
    pub service_template: PathBuf,

    /// Directory the recipes are written to
    #[arg(long, short = 'o', env = "RECIPE_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// TOML file with a flat table of input values, overridden by the environment
    #[arg(long, value_name = "PATH")]
    pub values_file: Option<PathBuf>,

    /// Override an input value (-D KEY=VALUE), applied after the environment
    ///
    /// Example: -D DEPLOYMENT_REPLICAS=3 -D PORT_TYPE=NodePort
    #[arg(short = 'D', value_name = "KEY=VALUE")]
    pub properties: Vec<String>,

    /// Do not print the summary table
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

impl GenerateCommand {
    /// Layer the values file, the process environment and `-D` properties.
    pub async fn resolve_inputs(&self, environment: RecipeInputs) -> anyhow::Result<RecipeInputs> {
        let mut inputs = match self.values_file {
            Some(ref path) => RecipeInputs::from_toml_file(path)
                .await
                .with_context(|| format!("Failed to load values file {}", path.display()))?,
            None => RecipeInputs::new(),
        };
        inputs.merge(environment);

        if !self.properties.is_empty() {
            let overrides =
                parse_properties(&self.properties).context("Failed to parse -D properties")?;
            inputs.merge(overrides);
        }

        tracing::debug!(count = inputs.len(), "resolved input values");
        Ok(inputs)
    }

    pub async fn execute(&self) -> anyhow::Result<()> {
        let inputs = self.resolve_inputs(RecipeInputs::from_env()).await?;

        let templates = TemplatePaths {
            deployment: self.deployment_template.clone(),
            service: self.service_template.clone(),
        };
        let descriptor =
            RecipeDescriptor::new(FileRecipeWriter::new(self.output_dir.clone()), templates);

        let report = descriptor
            .generate(&inputs)
            .await
            .context("Failed to generate recipes")?;

        if !self.quiet {
            println!("{}", TableRenderer::new().render_report(&report));
        }

        Ok(())
    }
}
