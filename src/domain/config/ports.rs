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
use crate::infrastructure::constants::{
    INPUT_PORTS, INPUT_PORT_TYPE, PROTOCOL_TCP, SERVICE_TYPE_LOAD_BALANCER,
};
use serde::Deserialize;

/// One custom port mapping of the workload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub name: String,
    /// Port the container listens on.
    pub internal: i32,
    /// Publicly routable port. Zero counts as unset.
    pub external: Option<i32>,
    pub protocol: &'static str,
}

impl PortSpec {
    pub fn new(name: impl Into<String>, internal: i32, external: Option<i32>) -> Self {
        Self {
            name: name.into(),
            internal,
            external,
            protocol: PROTOCOL_TCP,
        }
    }

    /// External port, if it marks this mapping as exposed.
    ///
    /// Numeric strings are converted before this check, so `"0"` is unexposed just like `0`.
    pub fn exposed_port(&self) -> Option<i32> {
        self.external.filter(|port| *port != 0)
    }
}

/// Port numbers are accepted either as JSON numbers or numeric strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawPortNumber {
    Number(i64),
    Text(String),
}

impl RawPortNumber {
    fn resolve(&self, field: &str) -> Result<i32, String> {
        match self {
            RawPortNumber::Number(n) => {
                i32::try_from(*n).map_err(|_| format!("{} port {} is out of range", field, n))
            }
            RawPortNumber::Text(s) => s
                .trim()
                .parse::<i32>()
                .map_err(|_| format!("{} port '{}' is not a number", field, s)),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPortSpec {
    #[serde(default)]
    name: Option<String>,
    internal: RawPortNumber,
    #[serde(default)]
    external: Option<RawPortNumber>,
}

/// What was found under the ports input.
///
/// `Absent`, `Malformed` and `Empty` all end up as "no custom ports"; they are kept apart so the
/// reason can be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortsSource {
    Absent,
    Malformed(String),
    Empty,
    Parsed(Vec<PortSpec>),
}

impl PortsSource {
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.is_empty()) else {
            return PortsSource::Absent;
        };

        let raw_ports: Vec<RawPortSpec> = match serde_json::from_str(raw) {
            Ok(ports) => ports,
            Err(e) => return PortsSource::Malformed(e.to_string()),
        };

        let mut ports = Vec::with_capacity(raw_ports.len());
        for raw_port in raw_ports {
            let internal = match raw_port.internal.resolve("internal") {
                Ok(port) => port,
                Err(reason) => return PortsSource::Malformed(reason),
            };
            let external = match raw_port.external.as_ref().map(|e| e.resolve("external")) {
                Some(Ok(port)) => Some(port),
                Some(Err(reason)) => return PortsSource::Malformed(reason),
                None => None,
            };
            ports.push(PortSpec::new(
                raw_port.name.unwrap_or_default(),
                internal,
                external,
            ));
        }

        if ports.is_empty() {
            PortsSource::Empty
        } else {
            PortsSource::Parsed(ports)
        }
    }

    pub fn into_ports(self) -> Option<Vec<PortSpec>> {
        match self {
            PortsSource::Parsed(ports) => Some(ports),
            _ => None,
        }
    }
}

/// Custom ports of a run plus whether the workload has to be exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortConfig {
    pub ports: Option<Vec<PortSpec>>,
    pub exposed: bool,
}

impl PortConfig {
    pub fn from_inputs(inputs: &RecipeInputs) -> Self {
        Self::parse(inputs.get(INPUT_PORTS), inputs.get(INPUT_PORT_TYPE))
    }

    pub fn parse(raw_ports: Option<&str>, port_type: Option<&str>) -> Self {
        let source = PortsSource::parse(raw_ports);
        match &source {
            PortsSource::Absent => tracing::debug!("no custom ports configured"),
            PortsSource::Empty => tracing::debug!("custom port list is empty"),
            PortsSource::Malformed(reason) => {
                tracing::warn!(%reason, "ignoring malformed {} value", INPUT_PORTS)
            }
            PortsSource::Parsed(ports) => tracing::debug!(count = ports.len(), "parsed custom ports"),
        }

        let load_balancer = port_type == Some(SERVICE_TYPE_LOAD_BALANCER);
        let ports = source.into_ports();
        // The LoadBalancer override only counts once at least one port was parsed
        let exposed = ports.as_ref().is_some_and(|ports| {
            load_balancer || ports.iter().any(|p| p.exposed_port().is_some())
        });

        Self { ports, exposed }
    }

    pub fn ports(&self) -> Option<&[PortSpec]> {
        self.ports.as_deref()
    }
}
