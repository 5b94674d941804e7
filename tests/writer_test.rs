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


use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::Service;
use kube_recipe::*;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Keeps rendered YAML in memory, optionally refusing Service writes.
#[derive(Default)]
struct MemoryRecipeWriter {
    written: Mutex<Vec<(String, String)>>,
    fail_services: bool,
}

impl MemoryRecipeWriter {
    fn failing_services() -> Self {
        Self {
            fail_services: true,
            ..Default::default()
        }
    }

    fn files(&self) -> Vec<String> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn content(&self, file: &str) -> Option<String> {
        self.written
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == file)
            .map(|(_, yaml)| yaml.clone())
    }
}

#[async_trait::async_trait]
impl RecipeWriter for MemoryRecipeWriter {
    async fn write_deployment(&self, deployment: &Deployment) -> Result<PathBuf> {
        let yaml = render_yaml(deployment)?;
        self.written
            .lock()
            .unwrap()
            .push(("deployment.yml".to_string(), yaml));
        Ok(PathBuf::from("deployment.yml"))
    }

    async fn write_service(
        &self,
        service: &Service,
        visibility: ServiceVisibility,
    ) -> Result<PathBuf> {
        let file = visibility.output_file();
        if self.fail_services {
            return Err(RecipeError::write_error(
                file,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ));
        }
        let yaml = render_yaml(service)?;
        self.written.lock().unwrap().push((file.to_string(), yaml));
        Ok(PathBuf::from(file))
    }
}

fn templates() -> TemplatePaths {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("templates");
    TemplatePaths {
        deployment: root.join("deployment.json"),
        service: root.join("service.json"),
    }
}

fn inputs(extra: &[(&'static str, &'static str)]) -> RecipeInputs {
    [
        ("DOCKER_HUB_REPO", "billing"),
        ("DOCKER_HUB_USER", "acme"),
        ("BITBUCKET_TAG", "2.0.1"),
        ("BITBUCKET_COMMIT", "c0ffee"),
    ]
    .into_iter()
    .chain(extra.iter().copied())
    .collect()
}

#[tokio::test]
async fn test_writes_in_pipeline_order() {
    let descriptor = RecipeDescriptor::new(MemoryRecipeWriter::default(), templates());
    let inputs = inputs(&[("PORTS", r#"[{"name":"web","internal":3000,"external":8080}]"#)]);

    let report = descriptor.generate(&inputs).await.unwrap();

    assert_eq!(
        descriptor.writer().files(),
        vec!["deployment.yml", "external-service.yml"]
    );
    assert_eq!(report.artifacts().count(), 2);

    let yaml = descriptor.writer().content("external-service.yml").unwrap();
    assert!(yaml.contains("name: service-billing-external"));
    assert!(!yaml.contains("nodePort: 38080"));
}

#[tokio::test]
async fn test_overflowing_node_port_stays_in_range() {
    let descriptor = RecipeDescriptor::new(MemoryRecipeWriter::default(), templates());
    let inputs = inputs(&[("PORTS", r#"[{"name":"web","internal":3000,"external":8080}]"#)]);

    descriptor.generate(&inputs).await.unwrap();

    let yaml = descriptor.writer().content("external-service.yml").unwrap();
    let service: Service = serde_yaml::from_str(&yaml).unwrap();
    let node_port = service.spec.unwrap().ports.unwrap()[0].node_port.unwrap();
    assert!((30001..=32767).contains(&node_port));
}

#[tokio::test]
async fn test_service_write_failure_is_fatal_after_deployment() {
    let descriptor = RecipeDescriptor::new(MemoryRecipeWriter::failing_services(), templates());
    let inputs = inputs(&[
        ("PORT_TYPE", "LoadBalancer"),
        ("PORTS", r#"[{"name":"web","internal":3000}]"#),
    ]);

    let err = descriptor.generate(&inputs).await.unwrap_err();

    assert!(matches!(err, RecipeError::WriteError { .. }));
    assert_eq!(descriptor.writer().files(), vec!["deployment.yml"]);
}

#[tokio::test]
async fn test_unexposed_run_writes_nothing_else() {
    let descriptor = RecipeDescriptor::new(MemoryRecipeWriter::failing_services(), templates());
    let inputs = inputs(&[("PORTS", r#"[{"name":"web","internal":3000}]"#)]);

    let report = descriptor.generate(&inputs).await.unwrap();

    assert!(report.service.is_none());
    let yaml = descriptor.writer().content("deployment.yml").unwrap();
    assert!(yaml.contains("containerPort: 3000"));
    assert!(!yaml.contains("readinessProbe"));
    assert!(yaml.contains("replicas: 1"));
}
