//! Application execution logic.
//!
//! Resolves the devices to show, queries them and writes the result to
//! stdout in the configured format.

use std::io::{self, Write};

use serde::Serialize;
use thiserror::Error;

use etherinfo::config::{OutputFormat, ValidatedConfig};
use etherinfo::device::{AttributeValue, DeviceError, DeviceInfo, DeviceReport};
use etherinfo::network::filter::FilteredEnumerator;
use etherinfo::network::platform::PlatformClient;
use etherinfo::network::{AddressRecord, DeviceEnumerator, DeviceQueryClient, QueryError};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to enumerate devices.
    #[error("Failed to list devices: {0}")]
    Enumerate(#[source] QueryError),

    /// A device query or attribute lookup failed.
    #[error(transparent)]
    Device(#[from] DeviceError),

    /// Failed to serialize JSON output.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Failed to write output.
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// One line of `--attribute` output.
#[derive(Debug, Serialize)]
struct AttributeLine {
    device: String,
    #[serde(flatten)]
    value: AttributeOutput,
}

/// A resolved attribute, with method handles already invoked.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum AttributeOutput {
    Value { value: AttributeValue },
    Records { value: Vec<AddressRecord> },
}

/// Executes one run against the platform client, writing to stdout.
///
/// # Errors
///
/// Returns an error if enumeration, a device query or writing fails.
///
/// # Coverage Note
///
/// Excluded from coverage because it talks to the running kernel.
#[cfg(not(tarpaulin_include))]
pub fn execute(config: &ValidatedConfig) -> Result<(), RunError> {
    let client = PlatformClient::new();
    let mut stdout = io::stdout().lock();
    execute_with(config, &client, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

/// Executes one run against any client.
///
/// All devices share the one client, and thereby one query session.
fn execute_with<C, W>(config: &ValidatedConfig, client: &C, out: &mut W) -> Result<(), RunError>
where
    C: DeviceQueryClient + DeviceEnumerator,
    W: Write,
{
    let (names, enumerated) = select_devices(config, client)?;
    let devices: Vec<DeviceInfo<&C>> = names
        .into_iter()
        .map(|name| DeviceInfo::new(name, client))
        .collect();

    if let Some(ref attribute) = config.attribute {
        let lines = collect_attribute(&devices, attribute, enumerated)?;
        write_attribute(out, &lines, config.format)
    } else {
        let reports = collect_reports(&devices, enumerated)?;
        write_reports(out, &reports, config.format)
    }
}

/// Returns the device names to show and whether they were enumerated.
fn select_devices<E: DeviceEnumerator>(
    config: &ValidatedConfig,
    enumerator: &E,
) -> Result<(Vec<String>, bool), RunError> {
    if !config.devices.is_empty() {
        return Ok((config.devices.clone(), false));
    }

    let filtered = FilteredEnumerator::new(enumerator, &config.filter);
    let names: Vec<String> = filtered
        .list_devices()
        .map_err(RunError::Enumerate)?
        .into_iter()
        .map(|d| d.name)
        .collect();

    if names.is_empty() {
        tracing::warn!("No devices matched the configured filters");
    } else {
        tracing::debug!(count = names.len(), "Selected devices");
    }

    Ok((names, true))
}

/// Skips devices that vanished between enumeration and query.
///
/// Named devices are never skipped: asking for a missing device is an error.
fn skip_vanished<T>(
    result: Result<T, DeviceError>,
    enumerated: bool,
) -> Result<Option<T>, DeviceError> {
    match result {
        Err(DeviceError::Query {
            device,
            source: QueryError::DeviceNotFound { .. },
        }) if enumerated => {
            tracing::warn!(device = %device, "Device disappeared, skipping");
            Ok(None)
        }
        other => other.map(Some),
    }
}

fn collect_reports<C: DeviceQueryClient>(
    devices: &[DeviceInfo<C>],
    enumerated: bool,
) -> Result<Vec<DeviceReport>, RunError> {
    let mut reports = Vec::with_capacity(devices.len());
    for device in devices {
        if let Some(report) = skip_vanished(device.report(), enumerated)? {
            reports.push(report);
        }
    }
    Ok(reports)
}

fn collect_attribute<C: DeviceQueryClient>(
    devices: &[DeviceInfo<C>],
    attribute: &str,
    enumerated: bool,
) -> Result<Vec<AttributeLine>, RunError> {
    let mut lines = Vec::with_capacity(devices.len());
    for device in devices {
        let resolved = device.get(attribute).and_then(|value| match value {
            AttributeValue::Method(method) => device
                .call(method)
                .map(|records| AttributeOutput::Records { value: records }),
            value => Ok(AttributeOutput::Value { value }),
        });

        if let Some(value) = skip_vanished(resolved, enumerated)? {
            lines.push(AttributeLine {
                device: device.device().to_string(),
                value,
            });
        }
    }
    Ok(lines)
}

fn write_reports<W: Write>(
    out: &mut W,
    reports: &[DeviceReport],
    format: OutputFormat,
) -> Result<(), RunError> {
    match format {
        OutputFormat::Json => write_json(out, reports),
        OutputFormat::Text => {
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    writeln!(out)?;
                }
                write!(out, "{report}")?;
            }
            Ok(())
        }
    }
}

fn write_attribute<W: Write>(
    out: &mut W,
    lines: &[AttributeLine],
    format: OutputFormat,
) -> Result<(), RunError> {
    match format {
        OutputFormat::Json => write_json(out, lines),
        OutputFormat::Text => {
            for line in lines {
                match &line.value {
                    AttributeOutput::Value { value } => writeln!(out, "{}: {value}", line.device)?,
                    AttributeOutput::Records { value } => {
                        writeln!(out, "{}: {}", line.device, format_records(value))?;
                    }
                }
            }
            Ok(())
        }
    }
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// Formats records as a comma-separated `address/prefix` list.
fn format_records(records: &[AddressRecord]) -> String {
    if records.is_empty() {
        return "none".to_string();
    }
    records
        .iter()
        .map(|r| {
            r.local.map_or_else(
                || format!("none/{}", r.prefix_len),
                |local| format!("{local}/{}", r.prefix_len),
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
