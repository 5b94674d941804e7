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

// Input names read from the environment mapping
pub const INPUT_PORTS: &str = "PORTS";
pub const INPUT_PORT_TYPE: &str = "PORT_TYPE";
pub const INPUT_DYNAMIC_EXTERNAL_PORTS: &str = "DYNAMIC_EXTERNAL_PORTS";
pub const INPUT_REPO: &str = "DOCKER_HUB_REPO";
pub const INPUT_REGISTRY_USER: &str = "DOCKER_HUB_USER";
pub const INPUT_TAG: &str = "BITBUCKET_TAG";
pub const INPUT_COMMIT: &str = "BITBUCKET_COMMIT";
pub const INPUT_NAME_SUFFIX: &str = "DEPLOYMENT_NAME_SUFFIX";
pub const INPUT_REPLICAS: &str = "DEPLOYMENT_REPLICAS";
pub const INPUT_PROBE_PORT: &str = "READINESS_PROBE_PORT";
pub const INPUT_PROBE_PATH: &str = "READINESS_PROBE_PATH";
pub const INPUT_CPU_LIMIT: &str = "AUTOSCALE_CPU_LIMIT";
pub const INPUT_PULL_POLICY: &str = "DOCKER_IMAGE_PULL_POLICY";
pub const INPUT_PRIVATE_REGISTRY: &str = "DOCKER_PRIVATE_REGISTRY";
pub const INPUT_APP_ENV: &str = "APP_ENV";
pub const INPUT_STARTUP_CMD: &str = "STARTUP_CMD";

pub const CUSTOM_ENV_MARKER: &str = "CUSTOM_";
pub const SECRET_ENV_MARKER: &str = "SECRET_ENV_";

/// Rendered in place of a required input that was never supplied.
pub const UNDEFINED_PLACEHOLDER: &str = "undefined";

pub const DEFAULT_APP_ENV: &str = "prod";
pub const DEFAULT_REPLICAS: i32 = 1;

pub const ENV_NAME_APP_ENV: &str = "APP_ENV";
pub const ENV_NAME_COMMIT: &str = "COMMIT";

pub const NAME_PREFIX_DEPLOYMENT: &str = "deployment-";
pub const NAME_PREFIX_POD: &str = "pod-";
pub const NAME_PREFIX_SERVICE: &str = "service-";

pub const LABEL_APP: &str = "app";

pub const SERVICE_TYPE_NODE_PORT: &str = "NodePort";
pub const SERVICE_TYPE_LOAD_BALANCER: &str = "LoadBalancer";

pub const PROTOCOL_TCP: &str = "TCP";

pub const NODE_PORT_BASE: i32 = 30000;
pub const NODE_PORT_MAX: i32 = 32767;
pub const NODE_PORT_FALLBACK_SPAN: i32 = NODE_PORT_MAX - NODE_PORT_BASE;

pub const INTERNAL_PORT_NAME: &str = "main";
pub const INTERNAL_PORT: i32 = 80;

pub const DEFAULT_DEPLOYMENT_TEMPLATE: &str = "templates/deployment.json";
pub const DEFAULT_SERVICE_TEMPLATE: &str = "templates/service.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".";

pub const DEPLOYMENT_OUTPUT_FILE: &str = "deployment.yml";
pub const EXTERNAL_SERVICE_OUTPUT_FILE: &str = "external-service.yml";
pub const INTERNAL_SERVICE_OUTPUT_FILE: &str = "internal-service.yml";
