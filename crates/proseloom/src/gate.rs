// SPDX-FileCopyrightText: 2026 Proseloom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation gate: one generation in flight at a time.
//!
//! A second request is rejected immediately with [`ProseloomError::Busy`],
//! without suspending. The permit releases on drop, including on every
//! failure path, so a failed generation can never leave the gate stuck.

use proseloom_core::ProseloomError;
use tokio::sync::{Mutex, TryLockError};

/// The gate owned by command dispatch.
#[derive(Debug, Default)]
pub struct GenerationGate {
    inflight: Mutex<()>,
}

/// RAII permit for one generation. Dropping it reopens the gate.
#[derive(Debug)]
pub struct GenerationPermit<'a> {
    _guard: tokio::sync::MutexGuard<'a, ()>,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gate without suspending.
    pub fn try_begin(&self) -> Result<GenerationPermit<'_>, ProseloomError> {
        self.inflight
            .try_lock()
            .map(|guard| GenerationPermit { _guard: guard })
            .map_err(|_: TryLockError| ProseloomError::Busy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_while_held() {
        let gate = GenerationGate::new();
        let permit = gate.try_begin().unwrap();
        assert!(matches!(gate.try_begin().unwrap_err(), ProseloomError::Busy));
        drop(permit);
        assert!(gate.try_begin().is_ok());
    }

    #[test]
    fn permit_releases_on_error_paths() {
        let gate = GenerationGate::new();

        fn failing_generation(gate: &GenerationGate) -> Result<(), ProseloomError> {
            let _permit = gate.try_begin()?;
            Err(ProseloomError::EmptyResult("no output".into()))
        }

        assert!(failing_generation(&gate).is_err());
        // The gate must be open again after the failure.
        assert!(gate.try_begin().is_ok());
    }
}
