/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Shared `boot` parameters every generated configuration nests.
//!
//! Declared in `dunedaq.daqconf.boot`.  Package schemas refer to [`boot`]
//! only through its `TypeRef` and take its default instance as-is, so the
//! field list here can grow without touching them.

use oschema::{field, Dtype, Namespace, SchemaError, TypeDef, TypeRef};

/// Namespace of the boot schema.
pub const NAMESPACE: &str = "dunedaq.daqconf.boot";

/// Fully-qualified name of the `boot` record.
pub fn boot() -> TypeRef {
    TypeRef::new(format!("{NAMESPACE}.boot"))
}

/// Declarations of the boot schema, in declaration order.
///
/// # Errors
/// Only if [`NAMESPACE`] were malformed.
pub fn types() -> Result<Vec<TypeDef>, SchemaError> {
    let mut ns = Namespace::new(NAMESPACE)?;

    let port = ns.number("port", Dtype::U4, "A TCP/IP port number");
    let count = ns.number("count", Dtype::U4, "A count of things");
    let flag = ns.boolean("Flag", "Parameter that can be used to enable or disable functionality");
    let host = ns.string("Host", "A hostname or IP address");
    let string = ns.string("String", "A string field");
    let monitoring_dest = ns.enumeration(
        "MonitoringDest",
        &["local", "cern", "pocket"],
        None,
        "Where operational monitoring and error reports are sent",
    );
    ns.enumeration(
        "PMChoice",
        &["k8s", "ssh"],
        None,
        "Process manager used to start applications",
    );

    ns.record(
        "boot",
        vec![
            field("base_command_port", &port, "Base port of application command endpoints")
                .with_default(3333),
            field("disable_trace", &flag, "Do not enable TRACE (default TRACE_FILE is /tmp/trace_buffer_${HOSTNAME}_${USER})")
                .with_default(false),
            field("opmon_impl", &monitoring_dest, "Info collector service implementation to use")
                .with_default("local"),
            field("ers_impl", &monitoring_dest, "ERS destination (Kafka used for cern and pocket)")
                .with_default("local"),
            field("pocket_url", &host, "URL for connecting to Pocket services").with_default("127.0.0.1"),
            field("image", &string, "Which docker image to use").with_default(""),
            field("use_k8s", &flag, "Whether to use k8s").with_default(false),
            field("op_env", &string, "Operational environment - used for raw data filename prefix and HDF5 Attribute inside the files")
                .with_default("swtest"),
            field("data_request_timeout_ms", &count, "The baseline data request timeout that will be used by modules in the Readout and Trigger subsystems")
                .with_default(1000),
        ],
        "Boot parameters",
    );

    Ok(ns.into_types())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
