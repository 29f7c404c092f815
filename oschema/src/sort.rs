/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Dependency ordering.
//!
//! A type depends on the item types of its record fields.  The order produced
//! here places every type after everything it depends on.  It is a
//! depth-first post-order walked in declaration order, so:
//!
//! * a declaration list that is already ordered comes back unchanged;
//! * the same input always yields the same output.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::hier::Hierarchy;
use crate::types::{Path, TypeDef};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    Visiting,
    Done,
}

/// Positions of `types` in dependency order.
///
/// `index` maps full names to positions and must cover every field item
/// (see [`check_references`](crate::validate)).
///
/// # Errors
/// [`SchemaError::CyclicDependency`] with the offending path, e.g.
/// `["x.a", "x.b", "x.a"]`.
pub(crate) fn topological_order(
    types: &[TypeDef],
    index: &HashMap<String, usize>,
) -> Result<Vec<usize>, SchemaError> {
    let mut marks = vec![Mark::Unvisited; types.len()];
    let mut order = Vec::with_capacity(types.len());

    for root in 0..types.len() {
        if marks[root] != Mark::Unvisited {
            continue;
        }

        // Explicit DFS stack: (position, its dependencies, next one to visit).
        // Dependency chains may be arbitrarily deep.
        let mut stack = vec![enter(root, types, index, &mut marks)];

        while let Some((pos, deps, next)) = stack.last_mut() {
            let Some(&dep) = deps.get(*next) else {
                marks[*pos] = Mark::Done;
                order.push(*pos);
                stack.pop();
                continue;
            };
            *next += 1;

            match marks[dep] {
                Mark::Done => {}
                Mark::Visiting => {
                    let start = stack.iter().position(|(p, ..)| *p == dep).unwrap_or(0);
                    let cycle = stack[start..]
                        .iter()
                        .map(|(p, ..)| *p)
                        .chain(std::iter::once(dep))
                        .map(|p| types[p].full_name().to_string())
                        .collect();
                    return Err(SchemaError::CyclicDependency { cycle });
                }
                Mark::Unvisited => stack.push(enter(dep, types, index, &mut marks)),
            }
        }
    }

    Ok(order)
}

fn enter(
    pos: usize,
    types: &[TypeDef],
    index: &HashMap<String, usize>,
    marks: &mut [Mark],
) -> (usize, Vec<usize>, usize) {
    marks[pos] = Mark::Visiting;
    let deps = types[pos]
        .dependencies()
        .filter_map(|d| index.get(d.as_str()).copied())
        .collect();
    (pos, deps, 0)
}

/// Validate `types` and return them in dependency order.
///
/// With `select`, only the types under that path are kept, together with
/// everything they transitively depend on (which may live elsewhere, such as
/// an imported base schema).
///
/// # Errors
/// Any [`SchemaError`] raised by [`Hierarchy::build`].
pub fn sort_select(types: Vec<TypeDef>, select: Option<&Path>) -> Result<Vec<TypeDef>, SchemaError> {
    let hier = Hierarchy::build(types)?;
    Ok(match select {
        Some(prefix) => hier.select(prefix).into_iter().cloned().collect(),
        None => hier.sorted().to_vec(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
