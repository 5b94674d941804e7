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

use crate::domain::config::RecipeInputs;
use crate::infrastructure::constants::*;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

/// Typed view of the inputs consumed by the Deployment recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadSettings {
    pub name: String,
    pub image: String,
    pub replicas: i32,
    pub readiness_probe: Option<ProbeSettings>,
    /// CPU limit in millicores, already suffixed with `m`.
    pub cpu_limit: Option<String>,
    pub image_pull_policy: Option<String>,
    pub private_registry: Option<String>,
    pub env: EnvSettings,
    pub startup_cmd: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProbeSettings {
    pub port: IntOrString,
    pub path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretEnv {
    pub name: String,
    pub secret_name: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSettings {
    pub app_env: String,
    pub custom: Vec<(String, String)>,
    pub secrets: Vec<SecretEnv>,
    pub commit: Option<String>,
}

/// Typed view of the inputs consumed by the Service recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExposureSettings {
    pub name: String,
    pub service_type: Option<String>,
    pub dynamic_external_ports: bool,
}

/// `<repo>` or `<repo>-<suffix>` when a suffix is configured.
pub fn canonical_name(inputs: &RecipeInputs) -> String {
    let repo = inputs.get_or_undefined(INPUT_REPO);
    match inputs.get_non_empty(INPUT_NAME_SUFFIX) {
        Some(suffix) => format!("{}-{}", repo, suffix),
        None => repo.to_string(),
    }
}

/// Leading integer of `value`, ignoring trailing garbage (`"500m"` gives 500).
pub(crate) fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|n| sign * n)
}

impl WorkloadSettings {
    pub fn from_inputs(inputs: &RecipeInputs) -> Self {
        let name = canonical_name(inputs);
        let image = format!(
            "{}/{}:v{}",
            inputs.get_or_undefined(INPUT_REGISTRY_USER),
            name,
            inputs.get_or_undefined(INPUT_TAG)
        );

        let replicas = inputs
            .get_non_empty(INPUT_REPLICAS)
            .and_then(parse_leading_int)
            .and_then(|n| i32::try_from(n).ok())
            .unwrap_or(DEFAULT_REPLICAS);

        let readiness_probe = inputs.get_non_empty(INPUT_PROBE_PORT).map(|port| {
            let port = match parse_leading_int(port).and_then(|n| i32::try_from(n).ok()) {
                Some(number) => IntOrString::Int(number),
                None => IntOrString::String(port.to_string()),
            };
            ProbeSettings {
                port,
                path: inputs.get_non_empty(INPUT_PROBE_PATH).map(String::from),
            }
        });

        let cpu_limit = inputs.get_non_empty(INPUT_CPU_LIMIT).and_then(|raw| {
            let millis = parse_leading_int(raw);
            if millis.is_none() {
                tracing::warn!(value = raw, "ignoring non-numeric {}", INPUT_CPU_LIMIT);
            }
            millis.map(|m| format!("{}m", m))
        });

        Self {
            name,
            image,
            replicas,
            readiness_probe,
            cpu_limit,
            image_pull_policy: inputs.get_non_empty(INPUT_PULL_POLICY).map(String::from),
            private_registry: inputs.get_non_empty(INPUT_PRIVATE_REGISTRY).map(String::from),
            env: EnvSettings::from_inputs(inputs),
            startup_cmd: inputs.get(INPUT_STARTUP_CMD).map(String::from),
        }
    }
}

impl EnvSettings {
    pub fn from_inputs(inputs: &RecipeInputs) -> Self {
        let mut custom = Vec::new();
        let mut secrets = Vec::new();

        for (key, value) in inputs.iter() {
            if key.contains(CUSTOM_ENV_MARKER) {
                custom.push((key.replacen(CUSTOM_ENV_MARKER, "", 1), value.to_string()));
            } else if key.contains(SECRET_ENV_MARKER) {
                let mut parts = value.split(':');
                let secret_name = parts.next().unwrap_or_default().to_string();
                let secret_key = match parts.next() {
                    Some(k) => k.to_string(),
                    None => {
                        tracing::warn!(
                            input = key,
                            value,
                            "secret reference is not in 'name:key' form"
                        );
                        UNDEFINED_PLACEHOLDER.to_string()
                    }
                };
                secrets.push(SecretEnv {
                    name: key.replacen(SECRET_ENV_MARKER, "", 1),
                    secret_name,
                    secret_key,
                });
            }
        }

        Self {
            app_env: inputs
                .get_non_empty(INPUT_APP_ENV)
                .unwrap_or(DEFAULT_APP_ENV)
                .to_string(),
            custom,
            secrets,
            commit: inputs.get(INPUT_COMMIT).map(String::from),
        }
    }
}

impl ExposureSettings {
    pub fn from_inputs(inputs: &RecipeInputs) -> Self {
        Self {
            name: canonical_name(inputs),
            service_type: inputs.get_non_empty(INPUT_PORT_TYPE).map(String::from),
            dynamic_external_ports: inputs.is_set(INPUT_DYNAMIC_EXTERNAL_PORTS),
        }
    }
}
