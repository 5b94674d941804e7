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

use super::env::EnvironmentBuilder;
use crate::domain::config::{PortSpec, WorkloadSettings};
use crate::infrastructure::constants::{LABEL_APP, NAME_PREFIX_DEPLOYMENT, NAME_PREFIX_POD};
use crate::shared::error::{RecipeError, Result};
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{
    Container, ContainerPort, HTTPGetAction, LocalObjectReference, PodSpec, Probe,
};
use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;

/// Rewrites a Deployment template into the workload recipe.
pub struct DeploymentBuilder<'a> {
    settings: &'a WorkloadSettings,
    ports: Option<&'a [PortSpec]>,
}

impl<'a> DeploymentBuilder<'a> {
    pub fn new(settings: &'a WorkloadSettings, ports: Option<&'a [PortSpec]>) -> Self {
        Self { settings, ports }
    }

    pub fn build(&self, mut deployment: Deployment) -> Result<Deployment> {
        let name = &self.settings.name;

        deployment.metadata.name = Some(format!("{}{}", NAME_PREFIX_DEPLOYMENT, name));
        set_app_label(&mut deployment.metadata.labels, name);

        let spec = deployment.spec.as_mut().ok_or_else(|| {
            RecipeError::InvalidResource("Deployment template has no spec".to_string())
        })?;

        set_app_label(&mut spec.selector.match_labels, name);
        set_app_label(
            &mut spec
                .template
                .metadata
                .get_or_insert_with(Default::default)
                .labels,
            name,
        );
        spec.replicas = Some(self.settings.replicas);

        let pod_spec = spec.template.spec.as_mut().ok_or_else(|| {
            RecipeError::InvalidResource("Deployment template has no pod spec".to_string())
        })?;
        self.apply_pull_secrets(pod_spec);

        let container = pod_spec.containers.first_mut().ok_or_else(|| {
            RecipeError::InvalidResource("Deployment template has no container".to_string())
        })?;
        self.apply_container(container);

        Ok(deployment)
    }

    fn apply_pull_secrets(&self, pod_spec: &mut PodSpec) {
        if let Some(ref registry) = self.settings.private_registry {
            pod_spec.image_pull_secrets = Some(vec![LocalObjectReference {
                name: registry.clone(),
            }]);
        }
    }

    fn apply_container(&self, container: &mut Container) {
        let settings = self.settings;

        container.name = format!("{}{}", NAME_PREFIX_POD, settings.name);
        container.image = Some(settings.image.clone());

        match settings.readiness_probe {
            Some(ref probe_settings) => {
                let probe = container.readiness_probe.get_or_insert_with(Probe::default);
                probe.http_get = Some(HTTPGetAction {
                    port: probe_settings.port.clone(),
                    path: probe_settings.path.clone(),
                    ..Default::default()
                });
            }
            None => container.readiness_probe = None,
        }

        if let Some(ref cpu) = settings.cpu_limit {
            container
                .resources
                .get_or_insert_with(Default::default)
                .limits
                .get_or_insert_with(BTreeMap::new)
                .insert("cpu".to_string(), Quantity(cpu.clone()));
        }

        if let Some(ref policy) = settings.image_pull_policy {
            container.image_pull_policy = Some(policy.clone());
        }

        container.env = Some(EnvironmentBuilder::new(&settings.env).build());

        if let Some(ref cmd) = settings.startup_cmd {
            container.args.get_or_insert_with(Vec::new).push(cmd.clone());
        }

        if let Some(ports) = self.ports {
            container.ports = Some(
                ports
                    .iter()
                    .map(|port| ContainerPort {
                        container_port: port.internal,
                        ..Default::default()
                    })
                    .collect(),
            );
        }
    }
}

fn set_app_label(labels: &mut Option<BTreeMap<String, String>>, name: &str) {
    labels
        .get_or_insert_with(BTreeMap::new)
        .insert(LABEL_APP.to_string(), name.to_string());
}
