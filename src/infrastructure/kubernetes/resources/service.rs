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

use crate::domain::config::{ExposureSettings, PortSpec};
use crate::infrastructure::constants::*;
use crate::shared::error::{RecipeError, Result};
use k8s_openapi::api::core::v1::{Service, ServicePort};
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;

/// Which of the two Service shapes a recipe ended up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceVisibility {
    External,
    Internal,
}

impl ServiceVisibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceVisibility::External => "external",
            ServiceVisibility::Internal => "internal",
        }
    }

    pub fn output_file(&self) -> &'static str {
        match self {
            ServiceVisibility::External => EXTERNAL_SERVICE_OUTPUT_FILE,
            ServiceVisibility::Internal => INTERNAL_SERVICE_OUTPUT_FILE,
        }
    }
}

impl fmt::Display for ServiceVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct ExposureRecipe {
    pub service: Service,
    pub visibility: ServiceVisibility,
}

/// Rewrites a Service template into the exposure recipe.
pub struct ServiceBuilder<'a> {
    settings: &'a ExposureSettings,
    ports: Option<&'a [PortSpec]>,
}

impl<'a> ServiceBuilder<'a> {
    pub fn new(settings: &'a ExposureSettings, ports: Option<&'a [PortSpec]>) -> Self {
        Self { settings, ports }
    }

    pub fn build(&self, service: Service) -> Result<ExposureRecipe> {
        self.build_with_rng(service, &mut rand::thread_rng())
    }

    /// Same as [`build`](Self::build) with an explicit random source for node-port fallback.
    pub fn build_with_rng<R: Rng + ?Sized>(
        &self,
        mut service: Service,
        rng: &mut R,
    ) -> Result<ExposureRecipe> {
        let name = &self.settings.name;

        service
            .metadata
            .labels
            .get_or_insert_with(BTreeMap::new)
            .insert(LABEL_APP.to_string(), name.clone());

        let spec = service.spec.as_mut().ok_or_else(|| {
            RecipeError::InvalidResource("Service template has no spec".to_string())
        })?;

        spec.selector
            .get_or_insert_with(BTreeMap::new)
            .insert(LABEL_APP.to_string(), name.clone());

        if let Some(ref service_type) = self.settings.service_type {
            spec.type_ = Some(service_type.clone());
        }

        let visibility = match self.ports {
            Some(ports) => {
                let node_ports = !self.settings.dynamic_external_ports
                    && spec.type_.as_deref() == Some(SERVICE_TYPE_NODE_PORT);

                spec.ports = Some(
                    ports
                        .iter()
                        .filter_map(|port| {
                            port.exposed_port()
                                .map(|external| external_port(port, external, node_ports, rng))
                        })
                        .collect(),
                );
                ServiceVisibility::External
            }
            None => {
                // Internal recipes never carry a type, even an explicitly configured one
                spec.type_ = None;
                spec.ports = Some(vec![ServicePort {
                    name: Some(INTERNAL_PORT_NAME.to_string()),
                    port: INTERNAL_PORT,
                    target_port: Some(IntOrString::Int(INTERNAL_PORT)),
                    protocol: Some(PROTOCOL_TCP.to_string()),
                    ..Default::default()
                }]);
                ServiceVisibility::Internal
            }
        };

        service.metadata.name = Some(format!(
            "{}{}-{}",
            NAME_PREFIX_SERVICE, name, visibility
        ));

        tracing::debug!(
            name = service.metadata.name.as_deref().unwrap_or_default(),
            %visibility,
            "built service recipe"
        );

        Ok(ExposureRecipe {
            service,
            visibility,
        })
    }
}

fn external_port<R: Rng + ?Sized>(
    port: &PortSpec,
    external: i32,
    node_ports: bool,
    rng: &mut R,
) -> ServicePort {
    ServicePort {
        name: Some(port.name.clone()).filter(|n| !n.is_empty()),
        port: external,
        target_port: Some(IntOrString::Int(port.internal)),
        protocol: Some(port.protocol.to_string()),
        node_port: node_ports.then(|| allocate_node_port(external, rng)),
        ..Default::default()
    }
}

/// Node port for an external port: `30000 + external`.
///
/// Values above the node-port range are re-rolled uniformly into `30001..=32767`. The fallback
/// is not deterministic and two overflowing ports of the same recipe may collide.
pub fn allocate_node_port<R: Rng + ?Sized>(external: i32, rng: &mut R) -> i32 {
    let node_port = NODE_PORT_BASE.saturating_add(external);
    if node_port > NODE_PORT_MAX {
        let fallback = NODE_PORT_BASE + rng.gen_range(1..=NODE_PORT_FALLBACK_SPAN);
        tracing::warn!(
            external,
            node_port = fallback,
            "node port {} is out of range, using a random one",
            node_port
        );
        fallback
    } else {
        node_port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn template() -> Service {
        serde_yaml::from_str(
            r#"
apiVersion: v1
kind: Service
metadata:
  name: placeholder
  labels:
    app: placeholder
spec:
  type: NodePort
  selector:
    app: placeholder
  ports:
    - name: web
      port: 8000
"#,
        )
        .unwrap()
    }

    fn settings(service_type: Option<&str>, dynamic: bool) -> ExposureSettings {
        ExposureSettings {
            name: "api".to_string(),
            service_type: service_type.map(String::from),
            dynamic_external_ports: dynamic,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn test_external_node_port() {
        let settings = settings(Some("NodePort"), false);
        let ports = vec![PortSpec::new("http", 8080, Some(80))];
        let recipe = ServiceBuilder::new(&settings, Some(&ports))
            .build_with_rng(template(), &mut rng())
            .unwrap();

        assert_eq!(recipe.visibility, ServiceVisibility::External);
        assert_eq!(recipe.service.metadata.name.as_deref(), Some("service-api-external"));

        let spec = recipe.service.spec.unwrap();
        assert_eq!(spec.type_.as_deref(), Some("NodePort"));
        assert_eq!(
            spec.selector.unwrap().get("app").map(String::as_str),
            Some("api")
        );

        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].name.as_deref(), Some("http"));
        assert_eq!(ports[0].port, 80);
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(8080)));
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
        assert_eq!(ports[0].node_port, Some(30080));
    }

    #[test]
    fn test_only_exposed_ports_listed() {
        let settings = settings(Some("LoadBalancer"), false);
        let ports = vec![
            PortSpec::new("metrics", 9090, None),
            PortSpec::new("http", 8080, Some(80)),
            PortSpec::new("zero", 7070, Some(0)),
        ];
        let recipe = ServiceBuilder::new(&settings, Some(&ports))
            .build_with_rng(template(), &mut rng())
            .unwrap();

        let spec = recipe.service.spec.unwrap();
        assert_eq!(spec.type_.as_deref(), Some("LoadBalancer"));
        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].name.as_deref(), Some("http"));
        assert!(ports[0].node_port.is_none());
    }

    #[test]
    fn test_dynamic_external_ports_skip_node_port() {
        let settings = settings(None, true);
        let ports = vec![PortSpec::new("http", 8080, Some(80))];
        let recipe = ServiceBuilder::new(&settings, Some(&ports))
            .build_with_rng(template(), &mut rng())
            .unwrap();

        let ports = recipe.service.spec.unwrap().ports.unwrap();
        assert!(ports[0].node_port.is_none());
    }

    #[test]
    fn test_overflowing_node_port_rerolled() {
        let mut rng = rng();
        for external in [2768, 5000, 30000, i32::MAX] {
            for _ in 0..100 {
                let node_port = allocate_node_port(external, &mut rng);
                assert!((30001..=32767).contains(&node_port), "{}", node_port);
            }
        }
        assert_eq!(allocate_node_port(2767, &mut rng), 32767);
    }

    #[test]
    fn test_internal_shape_discards_type() {
        let settings = settings(Some("LoadBalancer"), false);
        let recipe = ServiceBuilder::new(&settings, None)
            .build_with_rng(template(), &mut rng())
            .unwrap();

        assert_eq!(recipe.visibility, ServiceVisibility::Internal);
        assert_eq!(recipe.service.metadata.name.as_deref(), Some("service-api-internal"));

        let spec = recipe.service.spec.unwrap();
        assert!(spec.type_.is_none());
        let ports = spec.ports.unwrap();
        assert_eq!(ports.len(), 1);
        assert_eq!(ports[0].name.as_deref(), Some("main"));
        assert_eq!(ports[0].port, 80);
        assert_eq!(ports[0].target_port, Some(IntOrString::Int(80)));
        assert_eq!(ports[0].protocol.as_deref(), Some("TCP"));
    }

    #[test]
    fn test_visibility_output_files() {
        assert_eq!(ServiceVisibility::External.output_file(), "external-service.yml");
        assert_eq!(ServiceVisibility::Internal.output_file(), "internal-service.yml");
    }
}
