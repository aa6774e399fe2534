// SPDX-License-Identifier: Apache-2.0
// Copyright © 2025 Au-Zone Technologies. All Rights Reserved.

//! Species consistency verification for grouped plant instances.
//!
//! Every image of a plant instance should carry the same species label; a
//! mixed instance means either a mislabeled file or two different plants
//! photographed at coordinates that collide exactly. The checker walks
//! every instance and reports the ones whose labels disagree, along with
//! per-instance image count statistics.

use crate::instance::InstanceTable;
use std::fmt;

/// A plant instance whose images carry more than one species label.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesViolation {
    /// Instance id of the offending group.
    pub instance: u32,
    /// The distinct labels seen in the group, sorted.
    pub labels: Vec<String>,
}

impl fmt::Display for SpeciesViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "instance {} has more than one species: {}",
            self.instance,
            self.labels.join(", ")
        )
    }
}

/// Result of checking species consistency across plant instances.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCheckResult {
    /// Total distinct plant instances.
    pub total_instances: usize,
    /// Minimum images in any instance.
    pub min_images: usize,
    /// Maximum images in any instance.
    pub max_images: usize,
    /// Instances whose labels disagree.
    pub violations: Vec<SpeciesViolation>,
}

impl SpeciesCheckResult {
    /// Returns true if every instance contains a single species.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a one-line summary of the check.
    pub fn summary(&self) -> String {
        format!(
            "Instances: {} (min {} / max {} images per plant), mixed: {}",
            self.total_instances,
            self.min_images,
            self.max_images,
            self.violations.len()
        )
    }
}

impl fmt::Display for SpeciesCheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "╔══════════════════════════════════════════════════════════════╗"
        )?;
        writeln!(
            f,
            "║                  PLANT INSTANCE SPECIES CHECK                ║"
        )?;
        writeln!(
            f,
            "╠══════════════════════════════════════════════════════════════╣"
        )?;
        writeln!(
            f,
            "║ Instances (unique plants): {}",
            self.total_instances
        )?;
        writeln!(f, "║ Min images per plant:      {}", self.min_images)?;
        writeln!(f, "║ Max images per plant:      {}", self.max_images)?;
        if !self.violations.is_empty() {
            writeln!(f, "║ Mixed instances: {}", self.violations.len())?;
            for violation in self.violations.iter().take(5) {
                writeln!(f, "║   - {}", violation)?;
            }
            if self.violations.len() > 5 {
                writeln!(f, "║   ... and {} more", self.violations.len() - 5)?;
            }
        }
        writeln!(
            f,
            "╠══════════════════════════════════════════════════════════════╣"
        )?;
        let status = if self.is_valid() {
            "✓ All instances contain a single species"
        } else {
            "✗ Mixed species detected"
        };
        writeln!(f, "║ Status: {}", status)?;
        writeln!(
            f,
            "╚══════════════════════════════════════════════════════════════╝"
        )?;
        Ok(())
    }
}

/// Check that every plant instance contains a single species label.
///
/// Every instance id is examined, including the highest one. The result
/// carries one [`SpeciesViolation`] per mixed instance plus the instance
/// count and min/max images-per-instance statistics.
pub fn check_species_consistency(table: &InstanceTable) -> SpeciesCheckResult {
    let mut violations = Vec::new();
    for instance in 0..table.instance_count() as u32 {
        let mut labels: Vec<&str> = table.labels_for(instance);
        labels.sort_unstable();
        labels.dedup();
        if labels.len() > 1 {
            violations.push(SpeciesViolation {
                instance,
                labels: labels.into_iter().map(String::from).collect(),
            });
        }
    }

    let counts = table.image_counts();
    SpeciesCheckResult {
        total_instances: table.instance_count(),
        min_images: counts.iter().copied().min().unwrap_or(0),
        max_images: counts.iter().copied().max().unwrap_or(0),
        violations,
    }
}
