use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::error::SeedError;

/// Kind of health metric a sample represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    StepCount,
    SleepAnalysis,
    Workout,
    HeartRate,
    DateOfBirth,
    BiologicalSex,
    BodyMassIndex,
    Height,
    BodyMass,
    ActiveEnergy,
    ExerciseTime,
    RespiratoryRate,
}

impl DataCategory {
    pub const ALL: [DataCategory; 12] = [
        DataCategory::StepCount,
        DataCategory::SleepAnalysis,
        DataCategory::Workout,
        DataCategory::HeartRate,
        DataCategory::DateOfBirth,
        DataCategory::BiologicalSex,
        DataCategory::BodyMassIndex,
        DataCategory::Height,
        DataCategory::BodyMass,
        DataCategory::ActiveEnergy,
        DataCategory::ExerciseTime,
        DataCategory::RespiratoryRate,
    ];

    pub fn identifier(&self) -> &'static str {
        match self {
            DataCategory::StepCount => "step_count",
            DataCategory::SleepAnalysis => "sleep_analysis",
            DataCategory::Workout => "workout",
            DataCategory::HeartRate => "heart_rate",
            DataCategory::DateOfBirth => "date_of_birth",
            DataCategory::BiologicalSex => "biological_sex",
            DataCategory::BodyMassIndex => "body_mass_index",
            DataCategory::Height => "height",
            DataCategory::BodyMass => "body_mass",
            DataCategory::ActiveEnergy => "active_energy",
            DataCategory::ExerciseTime => "exercise_time",
            DataCategory::RespiratoryRate => "respiratory_rate",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Unit {
    Count,
    Hours,
    Minutes,
    Kilocalories,
    Miles,
    Meters,
    Kilograms,
    BeatsPerMinute,
    BreathsPerMinute,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Count => "count",
            Unit::Hours => "hr",
            Unit::Minutes => "min",
            Unit::Kilocalories => "kcal",
            Unit::Miles => "mi",
            Unit::Meters => "m",
            Unit::Kilograms => "kg",
            Unit::BeatsPerMinute => "count/min",
            Unit::BreathsPerMinute => "breaths/min",
        }
    }
}

/// How records of a category are laid out in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordShape {
    PointQuantity,
    IntervalValue,
    WorkoutAggregate,
    Characteristic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySpec {
    pub category: DataCategory,
    pub unit: Option<Unit>,
    pub shape: RecordShape,
    pub access: Access,
}

impl CategorySpec {
    pub fn new(category: DataCategory, unit: Option<Unit>, shape: RecordShape, access: Access) -> Self {
        Self { category, unit, shape, access }
    }

    pub fn is_writable(&self) -> bool {
        self.access == Access::ReadWrite
    }
}

/// Immutable lookup of every category the service knows about.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it afterwards.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    specs: HashMap<DataCategory, CategorySpec>,
}

impl CategoryTable {
    pub fn standard() -> Self {
        use Access::*;
        use RecordShape::*;

        Self::from_specs([
            CategorySpec::new(DataCategory::StepCount, Some(Unit::Count), PointQuantity, ReadWrite),
            CategorySpec::new(DataCategory::SleepAnalysis, Some(Unit::Hours), IntervalValue, ReadWrite),
            CategorySpec::new(DataCategory::Workout, Some(Unit::Kilocalories), WorkoutAggregate, ReadWrite),
            CategorySpec::new(DataCategory::HeartRate, Some(Unit::BeatsPerMinute), IntervalValue, ReadWrite),
            CategorySpec::new(DataCategory::DateOfBirth, None, Characteristic, ReadOnly),
            CategorySpec::new(DataCategory::BiologicalSex, None, Characteristic, ReadOnly),
            CategorySpec::new(DataCategory::BodyMassIndex, Some(Unit::Count), PointQuantity, ReadOnly),
            CategorySpec::new(DataCategory::Height, Some(Unit::Meters), PointQuantity, ReadOnly),
            CategorySpec::new(DataCategory::BodyMass, Some(Unit::Kilograms), PointQuantity, ReadOnly),
            CategorySpec::new(DataCategory::ActiveEnergy, Some(Unit::Kilocalories), PointQuantity, ReadOnly),
            CategorySpec::new(DataCategory::ExerciseTime, Some(Unit::Minutes), PointQuantity, ReadOnly),
            CategorySpec::new(DataCategory::RespiratoryRate, Some(Unit::BreathsPerMinute), PointQuantity, ReadOnly),
        ])
    }

    pub fn from_specs(specs: impl IntoIterator<Item = CategorySpec>) -> Self {
        Self {
            specs: specs.into_iter().map(|spec| (spec.category, spec)).collect(),
        }
    }

    pub fn get(&self, category: DataCategory) -> Option<&CategorySpec> {
        self.specs.get(&category)
    }

    pub fn resolve(&self, category: DataCategory) -> Result<&CategorySpec, SeedError> {
        self.get(category)
            .ok_or_else(|| SeedError::CategoryUnavailable(vec![category]))
    }

    /// Like [`resolve`](Self::resolve) but also requires write access.
    pub fn resolve_writable(&self, category: DataCategory) -> Result<&CategorySpec, SeedError> {
        let spec = self.resolve(category)?;
        if spec.is_writable() {
            Ok(spec)
        } else {
            Err(SeedError::CategoryUnavailable(vec![category]))
        }
    }

    pub fn read_set(&self) -> BTreeSet<DataCategory> {
        self.specs.keys().copied().collect()
    }

    pub fn write_set(&self) -> BTreeSet<DataCategory> {
        self.specs
            .values()
            .filter(|spec| spec.is_writable())
            .map(|spec| spec.category)
            .collect()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_covers_every_category() {
        let table = CategoryTable::standard();
        for category in DataCategory::ALL {
            assert!(table.get(category).is_some(), "missing {}", category);
        }
        assert_eq!(table.read_set().len(), 12);
    }

    #[test]
    fn only_seeded_categories_are_writable() {
        let table = CategoryTable::standard();
        let expected: BTreeSet<_> = [
            DataCategory::StepCount,
            DataCategory::SleepAnalysis,
            DataCategory::Workout,
            DataCategory::HeartRate,
        ]
        .into_iter()
        .collect();
        assert_eq!(table.write_set(), expected);
    }

    #[test]
    fn read_only_category_cannot_be_resolved_for_writing() {
        let table = CategoryTable::standard();
        assert!(table.resolve(DataCategory::Height).is_ok());
        assert!(matches!(
            table.resolve_writable(DataCategory::Height),
            Err(SeedError::CategoryUnavailable(ref missing)) if missing == &vec![DataCategory::Height]
        ));
    }

    #[test]
    fn unknown_category_is_unavailable() {
        let table = CategoryTable::from_specs([CategorySpec::new(
            DataCategory::StepCount,
            Some(Unit::Count),
            RecordShape::PointQuantity,
            Access::ReadWrite,
        )]);
        assert!(table.resolve(DataCategory::StepCount).is_ok());
        assert!(table.resolve(DataCategory::Workout).is_err());
    }
}
