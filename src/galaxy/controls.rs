//! Bounded editing of the live parameter set.
//!
//! Edits only mark the editor dirty. A caller turns a settled edit session
//! into exactly one regeneration by calling [`ParameterEditor::commit`].

use crate::galaxy::params::{Color, GalaxyParameters};

/// Inclusive editable range and step for one numeric field.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl ParamRange {
    const fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    /// Clamps `value` into range and snaps it onto the step grid anchored at `min`.
    pub fn constrain(&self, value: f64) -> f64 {
        let steps = ((value - self.min) / self.step).round();
        let snapped = self.min + steps * self.step;
        // Trim float noise so e.g. 0.30000000000000004 displays as 0.3
        let snapped = (snapped / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParameterField {
    Count,
    Size,
    Radius,
    BranchCount,
    Spin,
    Randomness,
    RandomnessPower,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        ParameterField::Count,
        ParameterField::Size,
        ParameterField::Radius,
        ParameterField::BranchCount,
        ParameterField::Spin,
        ParameterField::Randomness,
        ParameterField::RandomnessPower,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ParameterField::Count => "Particles",
            ParameterField::Size => "Particle Size",
            ParameterField::Radius => "Galaxy Radius",
            ParameterField::BranchCount => "Galaxy Branch",
            ParameterField::Spin => "Galaxy Spin",
            ParameterField::Randomness => "Particle Randomness",
            ParameterField::RandomnessPower => "Randomness Power",
        }
    }

    pub fn range(self) -> ParamRange {
        match self {
            ParameterField::Count => ParamRange::new(1000.0, 1_000_000.0, 100.0),
            ParameterField::Size => ParamRange::new(0.001, 0.1, 0.001),
            ParameterField::Radius => ParamRange::new(0.01, 20.0, 0.01),
            ParameterField::BranchCount => ParamRange::new(2.0, 20.0, 1.0),
            ParameterField::Spin => ParamRange::new(-2.0, 2.0, 0.1),
            ParameterField::Randomness => ParamRange::new(0.0, 1.0, 0.1),
            ParameterField::RandomnessPower => ParamRange::new(1.0, 10.0, 0.1),
        }
    }

    /// Formats `value` with as many decimals as the field's step uses.
    pub fn format(self, value: f64) -> String {
        let step = self.range().step;
        let decimals = if step >= 1.0 { 0 } else { (-step.log10()).round() as usize };
        format!("{value:.decimals$}")
    }

    fn get(self, params: &GalaxyParameters) -> f64 {
        match self {
            ParameterField::Count => f64::from(params.count),
            ParameterField::Size => f64::from(params.size),
            ParameterField::Radius => f64::from(params.radius),
            ParameterField::BranchCount => f64::from(params.branch_count),
            ParameterField::Spin => f64::from(params.spin),
            ParameterField::Randomness => f64::from(params.randomness),
            ParameterField::RandomnessPower => f64::from(params.randomness_power),
        }
    }

    fn set(self, params: &mut GalaxyParameters, value: f64) {
        match self {
            ParameterField::Count => params.count = value.round() as u32,
            ParameterField::Size => params.size = value as f32,
            ParameterField::Radius => params.radius = value as f32,
            ParameterField::BranchCount => params.branch_count = value.round() as u32,
            ParameterField::Spin => params.spin = value as f32,
            ParameterField::Randomness => params.randomness = value as f32,
            ParameterField::RandomnessPower => params.randomness_power = value as f32,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorSlot {
    Inward,
    Outward,
}

// Picked from when cycling colors from the keyboard
pub const PALETTE: [u32; 8] = [
    0xe55e15, 0x4848db, 0xffffff, 0xff6030, 0x1b3984, 0x00d1b2, 0xf7c948, 0xb14aed,
];

/// Owns the live parameter set and tracks whether it changed since the last commit.
#[derive(Debug, Clone)]
pub struct ParameterEditor {
    params: GalaxyParameters,
    selected: ParameterField,
    dirty: bool,
}

impl Default for ParameterEditor {
    fn default() -> Self {
        Self::new(GalaxyParameters::default())
    }
}

impl ParameterEditor {
    pub fn new(params: GalaxyParameters) -> Self {
        Self {
            params,
            selected: ParameterField::Count,
            dirty: false,
        }
    }

    pub fn params(&self) -> &GalaxyParameters {
        &self.params
    }

    pub fn selected(&self) -> ParameterField {
        self.selected
    }

    pub fn select(&mut self, field: ParameterField) {
        self.selected = field;
        log::debug!("Selected {}", field.name());
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn value(&self, field: ParameterField) -> f64 {
        field.get(&self.params)
    }

    /// Sets `field`, constrained to its range and step.
    pub fn set(&mut self, field: ParameterField, value: f64) {
        let constrained = field.range().constrain(value);
        // Compare in storage precision: most f64 steps have no exact f32
        let mut next = self.params;
        field.set(&mut next, constrained);
        if next != self.params {
            self.params = next;
            self.dirty = true;
            log::debug!("{} = {}", field.name(), field.format(constrained));
        }
    }

    /// Moves the selected field by `steps` increments.
    pub fn nudge(&mut self, steps: i32) {
        let field = self.selected;
        let value = field.get(&self.params) + f64::from(steps) * field.range().step;
        self.set(field, value);
    }

    pub fn set_color(&mut self, slot: ColorSlot, color: Color) {
        let target = match slot {
            ColorSlot::Inward => &mut self.params.inward_color,
            ColorSlot::Outward => &mut self.params.outward_color,
        };
        if *target != color {
            *target = color;
            self.dirty = true;
            log::debug!("{slot:?} color = #{:06x}", color.to_hex());
        }
    }

    /// Replaces the color in `slot` with the next palette entry.
    pub fn cycle_color(&mut self, slot: ColorSlot) {
        let current = match slot {
            ColorSlot::Inward => self.params.inward_color,
            ColorSlot::Outward => self.params.outward_color,
        }
        .to_hex();
        let next = PALETTE
            .iter()
            .position(|&hex| hex == current)
            .map_or(0, |i| (i + 1) % PALETTE.len());
        self.set_color(slot, Color::from_hex(PALETTE[next]));
    }

    /// Ends an edit session. Returns a snapshot to regenerate from if anything
    /// changed since the previous commit.
    pub fn commit(&mut self) -> Option<GalaxyParameters> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;
        Some(self.params)
    }

    pub fn describe(&self) -> String {
        let mut lines: Vec<String> = ParameterField::ALL
            .iter()
            .map(|&field| {
                let marker = if field == self.selected { '>' } else { ' ' };
                format!("{marker} {}: {}", field.name(), field.format(field.get(&self.params)))
            })
            .collect();
        lines.push(format!("  Galaxy Inward: #{:06x}", self.params.inward_color.to_hex()));
        lines.push(format!("  Galaxy Outward: #{:06x}", self.params.outward_color.to_hex()));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_and_snaps() {
        let count = ParameterField::Count.range();
        assert_eq!(count.constrain(0.0), 1000.0);
        assert_eq!(count.constrain(2_000_000.0), 1_000_000.0);
        assert_eq!(count.constrain(1234.0), 1200.0);

        let spin = ParameterField::Spin.range();
        assert!((spin.constrain(0.33) - 0.3).abs() < 1e-12);
        assert_eq!(spin.constrain(-5.0), -2.0);
    }

    #[test]
    fn edits_stay_in_range() {
        let mut editor = ParameterEditor::default();
        editor.select(ParameterField::BranchCount);
        editor.nudge(-100);
        assert_eq!(editor.params().branch_count, 2);
        editor.nudge(100);
        assert_eq!(editor.params().branch_count, 20);

        editor.set(ParameterField::Randomness, 3.0);
        assert_eq!(editor.params().randomness, 1.0);
        assert!(editor.params().validate().is_ok());
    }

    #[test]
    fn commit_only_after_a_change() {
        let mut editor = ParameterEditor::default();
        assert_eq!(editor.commit(), None);

        editor.select(ParameterField::Radius);
        editor.nudge(1);
        editor.nudge(1);
        editor.nudge(1);
        assert!(editor.is_dirty());

        let committed = editor.commit().unwrap();
        assert!((committed.radius - 5.03).abs() < 1e-5);
        assert_eq!(editor.commit(), None);
    }

    #[test]
    fn setting_the_same_value_is_not_an_edit() {
        let mut editor = ParameterEditor::default();
        editor.set(ParameterField::Count, 100_000.0);
        editor.set_color(ColorSlot::Inward, Color::from_hex(0xe55e15));
        assert!(!editor.is_dirty());
    }

    #[test]
    fn nudging_past_a_bound_is_not_an_edit() {
        let mut editor = ParameterEditor::new(GalaxyParameters {
            size: 0.1,
            radius: 0.01,
            ..Default::default()
        });

        editor.select(ParameterField::Size);
        editor.nudge(1);
        editor.nudge(10);
        editor.select(ParameterField::Radius);
        editor.nudge(-1);
        assert!(!editor.is_dirty());
        assert_eq!(editor.commit(), None);
        assert_eq!(editor.params().size, 0.1);
        assert_eq!(editor.params().radius, 0.01);
    }

    #[test]
    fn inexact_values_already_held_are_not_edits() {
        let mut editor = ParameterEditor::default();
        editor.set(ParameterField::Size, 0.01);
        editor.set(ParameterField::Spin, 1.0);
        editor.set(ParameterField::Randomness, 0.2);
        assert_eq!(editor.commit(), None);

        editor.set(ParameterField::Size, 0.011);
        assert!(editor.commit().is_some());
    }

    #[test]
    fn committed_snapshot_is_detached_from_later_edits() {
        let mut editor = ParameterEditor::default();
        editor.set(ParameterField::Count, 5000.0);
        let snapshot = editor.commit().unwrap();

        editor.set(ParameterField::Count, 9000.0);
        assert_eq!(snapshot.count, 5000);
        assert_eq!(editor.params().count, 9000);
    }

    #[test]
    fn values_format_to_step_precision() {
        assert_eq!(ParameterField::Count.format(100_000.0), "100000");
        assert_eq!(ParameterField::Size.format(f64::from(0.01f32)), "0.010");
        assert_eq!(ParameterField::Spin.format(-0.3), "-0.3");
    }

    #[test]
    fn colors_cycle_through_the_palette() {
        let mut editor = ParameterEditor::default();
        editor.cycle_color(ColorSlot::Inward);
        assert_eq!(editor.params().inward_color.to_hex(), PALETTE[1]);
        for _ in 0..PALETTE.len() {
            editor.cycle_color(ColorSlot::Inward);
        }
        assert_eq!(editor.params().inward_color.to_hex(), PALETTE[1]);
        assert!(editor.commit().is_some());
    }
}
