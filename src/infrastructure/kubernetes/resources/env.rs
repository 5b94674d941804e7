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

use crate::domain::config::{EnvSettings, SecretEnv};
use crate::infrastructure::constants::{ENV_NAME_APP_ENV, ENV_NAME_COMMIT};
use k8s_openapi::api::core::v1::{EnvVar, EnvVarSource, SecretKeySelector};

/// Assembles the container environment.
///
/// Order is fixed: `APP_ENV`, custom literals, secret references, `COMMIT`.
pub struct EnvironmentBuilder<'a> {
    settings: &'a EnvSettings,
}

impl<'a> EnvironmentBuilder<'a> {
    pub fn new(settings: &'a EnvSettings) -> Self {
        Self { settings }
    }

    pub fn build(self) -> Vec<EnvVar> {
        let mut env_vars = Vec::with_capacity(
            self.settings.custom.len() + self.settings.secrets.len() + 2,
        );
        env_vars.push(literal(ENV_NAME_APP_ENV, Some(self.settings.app_env.clone())));
        env_vars.extend(self.build_custom_env_vars());
        env_vars.extend(self.build_secret_env_vars());
        env_vars.push(literal(ENV_NAME_COMMIT, self.settings.commit.clone()));
        env_vars
    }

    fn build_custom_env_vars(&self) -> impl Iterator<Item = EnvVar> + '_ {
        self.settings
            .custom
            .iter()
            .map(|(name, value)| literal(name, Some(value.clone())))
    }

    fn build_secret_env_vars(&self) -> impl Iterator<Item = EnvVar> + '_ {
        self.settings.secrets.iter().map(secret_ref)
    }
}

fn literal(name: &str, value: Option<String>) -> EnvVar {
    EnvVar {
        name: name.to_string(),
        value,
        ..Default::default()
    }
}

fn secret_ref(secret: &SecretEnv) -> EnvVar {
    EnvVar {
        name: secret.name.clone(),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: secret.secret_name.clone(),
                key: secret.secret_key.clone(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_order() {
        let settings = EnvSettings {
            app_env: "prod".to_string(),
            custom: vec![("LOG_LEVEL".to_string(), "info".to_string())],
            secrets: vec![SecretEnv {
                name: "DB_PASSWORD".to_string(),
                secret_name: "db".to_string(),
                secret_key: "password".to_string(),
            }],
            commit: Some("abc123".to_string()),
        };

        let env = EnvironmentBuilder::new(&settings).build();
        let names: Vec<&str> = env.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["APP_ENV", "LOG_LEVEL", "DB_PASSWORD", "COMMIT"]);

        let secret = env[2]
            .value_from
            .as_ref()
            .and_then(|v| v.secret_key_ref.as_ref())
            .unwrap();
        assert_eq!(secret.name, "db");
        assert_eq!(secret.key, "password");
        assert!(env[2].value.is_none());
        assert_eq!(env[3].value.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_commit_without_value() {
        let settings = EnvSettings {
            app_env: "prod".to_string(),
            ..Default::default()
        };

        let env = EnvironmentBuilder::new(&settings).build();
        assert_eq!(env.len(), 2);
        assert_eq!(env[1].name, "COMMIT");
        assert!(env[1].value.is_none());
    }
}
