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

use crate::domain::config::{
    ExposureSettings, PortConfig, PortSpec, RecipeInputs, WorkloadSettings,
};
use crate::infrastructure::constants::{DEFAULT_DEPLOYMENT_TEMPLATE, DEFAULT_SERVICE_TEMPLATE};
use crate::infrastructure::kubernetes::resources::{
    load_deployment_template, load_service_template, DeploymentBuilder, ServiceBuilder,
    ServiceVisibility,
};
use crate::infrastructure::kubernetes::RecipeWriter;
use crate::shared::error::Result;
use std::path::PathBuf;

/// Locations of the two base templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplatePaths {
    pub deployment: PathBuf,
    pub service: PathBuf,
}

impl Default for TemplatePaths {
    fn default() -> Self {
        Self {
            deployment: PathBuf::from(DEFAULT_DEPLOYMENT_TEMPLATE),
            service: PathBuf::from(DEFAULT_SERVICE_TEMPLATE),
        }
    }
}

/// One recipe file that was produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeArtifact {
    pub kind: &'static str,
    pub name: String,
    pub path: PathBuf,
    pub visibility: Option<ServiceVisibility>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub deployment: RecipeArtifact,
    /// `None` when no port asked for exposure.
    pub service: Option<RecipeArtifact>,
}

impl GenerationReport {
    pub fn artifacts(&self) -> impl Iterator<Item = &RecipeArtifact> {
        std::iter::once(&self.deployment).chain(self.service.as_ref())
    }
}

/// Drives one generation run: ports, then the Deployment, then the Service if exposed.
///
/// The Deployment is written before the Service template is even read, so a failing Service
/// step leaves the Deployment recipe on disk.
pub struct RecipeDescriptor<W: RecipeWriter> {
    writer: W,
    templates: TemplatePaths,
}

impl<W: RecipeWriter> RecipeDescriptor<W> {
    pub fn new(writer: W, templates: TemplatePaths) -> Self {
        Self { writer, templates }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub async fn generate(&self, inputs: &RecipeInputs) -> Result<GenerationReport> {
        let port_config = PortConfig::from_inputs(inputs);
        let ports = port_config.ports();

        let deployment = self.generate_deployment(inputs, ports).await?;
        println!("Generated Kubernetes Deployment Recipe ...");

        let service = if port_config.exposed {
            let service = self.generate_service(inputs, ports).await?;
            println!("Generated Kubernetes Service Recipe and attached it to Deployment Recipe...");
            Some(service)
        } else {
            println!("did not detect any exposed ports, no service file will be created.");
            None
        };

        Ok(GenerationReport {
            deployment,
            service,
        })
    }

    async fn generate_deployment(
        &self,
        inputs: &RecipeInputs,
        ports: Option<&[PortSpec]>,
    ) -> Result<RecipeArtifact> {
        let template = load_deployment_template(&self.templates.deployment).await?;
        let settings = WorkloadSettings::from_inputs(inputs);
        let deployment = DeploymentBuilder::new(&settings, ports).build(template)?;

        let path = self.writer.write_deployment(&deployment).await?;

        Ok(RecipeArtifact {
            kind: "Deployment",
            name: deployment.metadata.name.unwrap_or_default(),
            path,
            visibility: None,
        })
    }

    async fn generate_service(
        &self,
        inputs: &RecipeInputs,
        ports: Option<&[PortSpec]>,
    ) -> Result<RecipeArtifact> {
        let template = load_service_template(&self.templates.service).await?;
        let settings = ExposureSettings::from_inputs(inputs);
        let recipe = ServiceBuilder::new(&settings, ports).build(template)?;

        let path = self
            .writer
            .write_service(&recipe.service, recipe.visibility)
            .await?;

        Ok(RecipeArtifact {
            kind: "Service",
            name: recipe.service.metadata.name.unwrap_or_default(),
            path,
            visibility: Some(recipe.visibility),
        })
    }
}
