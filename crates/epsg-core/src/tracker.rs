//! Keeps an applied EPSG code consistent with the fields it populated.
//!
//! Applying a code rewrites several fields on the editing surface. Each
//! rewrite fires the same change notification a user edit would, so the
//! tracker has to tell its own echoes apart from real edits. Every apply
//! issues a fresh [`ApplyEpoch`]; a surface that tags its writes with that
//! epoch gets exact answers. Untagged notifications fall back to one
//! consume-once slot per datum, projection and height selector.

use std::fmt;
use std::str::FromStr;

use epsg_model::{DerivedParameters, EpsgRegistry};
use tracing::{debug, warn};

use crate::derive::derive_parameters;
use crate::error::{ApplicationError, Result};

/// Identifies one successful apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApplyEpoch(u64);

impl ApplyEpoch {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ApplyEpoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A field on the editing surface that an EPSG code populates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Datum,
    CoordinateSystem,
    HeightType,
    Zone,
    ZoneOverride,
    Hemisphere,
    CentralMeridian,
    StandardParallel,
    FalseEasting,
    FalseNorthing,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Datum => "datum",
            FieldKind::CoordinateSystem => "coord-sys",
            FieldKind::HeightType => "height",
            FieldKind::Zone => "zone",
            FieldKind::ZoneOverride => "override",
            FieldKind::Hemisphere => "hemisphere",
            FieldKind::CentralMeridian => "central-meridian",
            FieldKind::StandardParallel => "standard-parallel",
            FieldKind::FalseEasting => "false-easting",
            FieldKind::FalseNorthing => "false-northing",
        }
    }

    pub fn all() -> &'static [FieldKind] {
        &[
            Self::Datum,
            Self::CoordinateSystem,
            Self::HeightType,
            Self::Zone,
            Self::ZoneOverride,
            Self::Hemisphere,
            Self::CentralMeridian,
            Self::StandardParallel,
            Self::FalseEasting,
            Self::FalseNorthing,
        ]
    }

    /// Fields a set of parameters writes, in the order a surface applies them.
    pub fn rewritten_by(parameters: &DerivedParameters) -> Vec<FieldKind> {
        let mut fields = vec![FieldKind::Datum, FieldKind::CoordinateSystem];
        match parameters {
            DerivedParameters::Utm { .. } => {
                fields.extend([FieldKind::Zone, FieldKind::ZoneOverride, FieldKind::Hemisphere]);
            }
            DerivedParameters::MercatorStandardParallel { .. } => fields.extend([
                FieldKind::CentralMeridian,
                FieldKind::StandardParallel,
                FieldKind::FalseEasting,
                FieldKind::FalseNorthing,
            ]),
            DerivedParameters::Geodetic { .. } => fields.push(FieldKind::HeightType),
            DerivedParameters::Ups { .. } => fields.push(FieldKind::Hemisphere),
            DerivedParameters::Geocentric { .. } | DerivedParameters::WebMercator { .. } => {}
        }
        fields
    }

    fn echo_slot(self) -> Option<EchoSlot> {
        match self {
            FieldKind::Datum => Some(EchoSlot::Datum),
            FieldKind::CoordinateSystem => Some(EchoSlot::Projection),
            FieldKind::HeightType => Some(EchoSlot::Height),
            _ => None,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown field '{s}'"))
    }
}

/// Who caused a field change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeOrigin {
    /// A person edited the field.
    User,
    /// The surface wrote the field while applying the code of this epoch.
    Programmatic(ApplyEpoch),
    /// Unknown; fall back to the consume-once slots.
    Untagged,
}

/// What a field change did to the active code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldChangeOutcome {
    /// No code was active.
    Inactive,
    /// The change was an echo of the apply; the code stays.
    Absorbed,
    /// The change contradicts the code, which was dropped.
    Invalidated,
    /// A write from an earlier apply; ignored.
    Stale,
}

/// Result of a successful apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub code: String,
    pub parameters: DerivedParameters,
    pub epoch: ApplyEpoch,
    /// Fields the surface should write, tagged with `epoch`.
    pub rewritten: Vec<FieldKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EchoSlot {
    Datum,
    Projection,
    Height,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct EchoSlots {
    datum: bool,
    projection: bool,
    height: bool,
}

impl EchoSlots {
    fn armed() -> Self {
        Self {
            datum: true,
            projection: true,
            height: true,
        }
    }

    fn slot_mut(&mut self, slot: EchoSlot) -> &mut bool {
        match slot {
            EchoSlot::Datum => &mut self.datum,
            EchoSlot::Projection => &mut self.projection,
            EchoSlot::Height => &mut self.height,
        }
    }

    /// Disarms `slot`, returning whether it was armed.
    fn consume(&mut self, slot: EchoSlot) -> bool {
        std::mem::take(self.slot_mut(slot))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ActiveCode {
    code: String,
    epoch: ApplyEpoch,
}

/// Tracks which EPSG code, if any, still describes the surface's fields.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyTracker {
    current: Option<ActiveCode>,
    echoes: EchoSlots,
    last_epoch: u64,
}

impl ConsistencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies `code` from `registry`.
    ///
    /// # Errors
    ///
    /// Fails when the code is unknown or its entry cannot be mapped. The
    /// tracker is cleared on failure.
    pub fn apply(&mut self, code: &str, registry: &EpsgRegistry) -> Result<Applied> {
        let derived = registry
            .get(code)
            .ok_or_else(|| ApplicationError::UnsupportedCode(code.to_string()))
            .and_then(|entry| derive_parameters(code, entry));

        let parameters = match derived {
            Ok(parameters) => parameters,
            Err(err) => {
                warn!(code, error = %err, "EPSG code not applied");
                self.clear();
                return Err(err);
            }
        };

        self.last_epoch += 1;
        let epoch = ApplyEpoch(self.last_epoch);
        self.current = Some(ActiveCode {
            code: code.to_string(),
            epoch,
        });
        self.echoes = EchoSlots::armed();
        debug!(code, %epoch, coord_sys = %parameters.kind(), "EPSG code applied");

        Ok(Applied {
            code: code.to_string(),
            rewritten: FieldKind::rewritten_by(&parameters),
            parameters,
            epoch,
        })
    }

    /// Reports a change to `field` and decides whether the code survives it.
    pub fn notify_field_changed(
        &mut self,
        field: FieldKind,
        origin: ChangeOrigin,
    ) -> FieldChangeOutcome {
        let Some(active) = &self.current else {
            return FieldChangeOutcome::Inactive;
        };

        let outcome = match origin {
            ChangeOrigin::Programmatic(epoch) if epoch == active.epoch => {
                if let Some(slot) = field.echo_slot() {
                    self.echoes.consume(slot);
                }
                FieldChangeOutcome::Absorbed
            }
            ChangeOrigin::Programmatic(_) => FieldChangeOutcome::Stale,
            ChangeOrigin::Untagged => match field.echo_slot() {
                Some(slot) if self.echoes.consume(slot) => FieldChangeOutcome::Absorbed,
                _ => FieldChangeOutcome::Invalidated,
            },
            ChangeOrigin::User => FieldChangeOutcome::Invalidated,
        };

        if outcome == FieldChangeOutcome::Invalidated {
            debug!(code = %active.code, %field, "field edit invalidated EPSG code");
            self.clear();
        }
        outcome
    }

    /// Arms the slot for `field` ahead of a programmatic write that is not
    /// part of an apply. Returns the epoch to tag the write with.
    ///
    /// Does nothing when no code is active or `field` has no slot.
    pub fn expect_echo(&mut self, field: FieldKind) -> Option<ApplyEpoch> {
        let epoch = self.current.as_ref()?.epoch;
        let slot = field.echo_slot()?;
        *self.echoes.slot_mut(slot) = true;
        Some(epoch)
    }

    /// Drops the active code and every armed slot.
    pub fn clear(&mut self) {
        self.current = None;
        self.echoes = EchoSlots::default();
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn current_code(&self) -> Option<&str> {
        self.current.as_ref().map(|active| active.code.as_str())
    }

    pub fn current_epoch(&self) -> Option<ApplyEpoch> {
        self.current.as_ref().map(|active| active.epoch)
    }

    /// Fields whose next untagged change will be absorbed.
    pub fn pending_echoes(&self) -> Vec<FieldKind> {
        [
            (self.echoes.datum, FieldKind::Datum),
            (self.echoes.projection, FieldKind::CoordinateSystem),
            (self.echoes.height, FieldKind::HeightType),
        ]
        .into_iter()
        .filter_map(|(armed, field)| armed.then_some(field))
        .collect()
    }
}
