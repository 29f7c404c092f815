/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! package-confgen – configuration schema and config generator for a DAQ package
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── boot/          – shared boot parameters (dunedaq.daqconf.boot)
//! ├── package_gen/   – the package's own confgen schema
//! ├── naming/        – package / DAQ module naming rules
//! └── config/        – user config loading over schema defaults
//! ```

pub mod boot;
pub mod config;
pub mod naming;
pub mod package_gen;
