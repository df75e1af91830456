//! Health data types and the display categories they roll up into.
//!
//! Access logs record fine-grained data types (`STEPS`, `HEART_RATE`, ...),
//! while the recent access list only shows the category each type belongs to.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthDataCategory {
    Activity,
    BodyMeasurements,
    CycleTracking,
    Nutrition,
    Sleep,
    Vitals,
    Wellness,
}

impl HealthDataCategory {
    pub fn label(&self) -> &'static str {
        match self {
            HealthDataCategory::Activity => "Activity",
            HealthDataCategory::BodyMeasurements => "Body measurements",
            HealthDataCategory::CycleTracking => "Cycle tracking",
            HealthDataCategory::Nutrition => "Nutrition",
            HealthDataCategory::Sleep => "Sleep",
            HealthDataCategory::Vitals => "Vitals",
            HealthDataCategory::Wellness => "Wellness",
        }
    }
}

impl fmt::Display for HealthDataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    // Activity
    ActiveCaloriesBurned,
    CyclingPedalingCadence,
    Distance,
    ElevationGained,
    Exercise,
    ExerciseRoute,
    FloorsClimbed,
    PlannedExercise,
    Power,
    Speed,
    Steps,
    StepsCadence,
    TotalCaloriesBurned,
    Vo2Max,
    WheelchairPushes,
    // Body measurements
    BasalMetabolicRate,
    BodyFat,
    BodyWaterMass,
    BoneMass,
    Height,
    LeanBodyMass,
    Weight,
    // Cycle tracking
    CervicalMucus,
    IntermenstrualBleeding,
    MenstruationFlow,
    MenstruationPeriod,
    OvulationTest,
    SexualActivity,
    // Nutrition
    Hydration,
    Nutrition,
    // Sleep
    Sleep,
    // Vitals
    BasalBodyTemperature,
    BloodGlucose,
    BloodPressure,
    BodyTemperature,
    HeartRate,
    HeartRateVariability,
    OxygenSaturation,
    RespiratoryRate,
    RestingHeartRate,
    SkinTemperature,
    // Wellness
    Mindfulness,
}

impl DataType {
    pub const ALL: [DataType; 42] = [
        DataType::ActiveCaloriesBurned,
        DataType::CyclingPedalingCadence,
        DataType::Distance,
        DataType::ElevationGained,
        DataType::Exercise,
        DataType::ExerciseRoute,
        DataType::FloorsClimbed,
        DataType::PlannedExercise,
        DataType::Power,
        DataType::Speed,
        DataType::Steps,
        DataType::StepsCadence,
        DataType::TotalCaloriesBurned,
        DataType::Vo2Max,
        DataType::WheelchairPushes,
        DataType::BasalMetabolicRate,
        DataType::BodyFat,
        DataType::BodyWaterMass,
        DataType::BoneMass,
        DataType::Height,
        DataType::LeanBodyMass,
        DataType::Weight,
        DataType::CervicalMucus,
        DataType::IntermenstrualBleeding,
        DataType::MenstruationFlow,
        DataType::MenstruationPeriod,
        DataType::OvulationTest,
        DataType::SexualActivity,
        DataType::Hydration,
        DataType::Nutrition,
        DataType::Sleep,
        DataType::BasalBodyTemperature,
        DataType::BloodGlucose,
        DataType::BloodPressure,
        DataType::BodyTemperature,
        DataType::HeartRate,
        DataType::HeartRateVariability,
        DataType::OxygenSaturation,
        DataType::RespiratoryRate,
        DataType::RestingHeartRate,
        DataType::SkinTemperature,
        DataType::Mindfulness,
    ];

    pub fn category(&self) -> HealthDataCategory {
        use DataType::*;
        match self {
            ActiveCaloriesBurned | CyclingPedalingCadence | Distance | ElevationGained
            | Exercise | ExerciseRoute | FloorsClimbed | PlannedExercise | Power | Speed
            | Steps | StepsCadence | TotalCaloriesBurned | Vo2Max | WheelchairPushes => {
                HealthDataCategory::Activity
            }
            BasalMetabolicRate | BodyFat | BodyWaterMass | BoneMass | Height | LeanBodyMass
            | Weight => HealthDataCategory::BodyMeasurements,
            CervicalMucus | IntermenstrualBleeding | MenstruationFlow | MenstruationPeriod
            | OvulationTest | SexualActivity => HealthDataCategory::CycleTracking,
            Hydration | Nutrition => HealthDataCategory::Nutrition,
            Sleep => HealthDataCategory::Sleep,
            BasalBodyTemperature | BloodGlucose | BloodPressure | BodyTemperature | HeartRate
            | HeartRateVariability | OxygenSaturation | RespiratoryRate | RestingHeartRate
            | SkinTemperature => HealthDataCategory::Vitals,
            Mindfulness => HealthDataCategory::Wellness,
        }
    }

    /// Identifier used in the access log store, e.g. `HEART_RATE`.
    pub fn as_str(&self) -> &'static str {
        use DataType::*;
        match self {
            ActiveCaloriesBurned => "ACTIVE_CALORIES_BURNED",
            CyclingPedalingCadence => "CYCLING_PEDALING_CADENCE",
            Distance => "DISTANCE",
            ElevationGained => "ELEVATION_GAINED",
            Exercise => "EXERCISE",
            ExerciseRoute => "EXERCISE_ROUTE",
            FloorsClimbed => "FLOORS_CLIMBED",
            PlannedExercise => "PLANNED_EXERCISE",
            Power => "POWER",
            Speed => "SPEED",
            Steps => "STEPS",
            StepsCadence => "STEPS_CADENCE",
            TotalCaloriesBurned => "TOTAL_CALORIES_BURNED",
            Vo2Max => "VO2_MAX",
            WheelchairPushes => "WHEELCHAIR_PUSHES",
            BasalMetabolicRate => "BASAL_METABOLIC_RATE",
            BodyFat => "BODY_FAT",
            BodyWaterMass => "BODY_WATER_MASS",
            BoneMass => "BONE_MASS",
            Height => "HEIGHT",
            LeanBodyMass => "LEAN_BODY_MASS",
            Weight => "WEIGHT",
            CervicalMucus => "CERVICAL_MUCUS",
            IntermenstrualBleeding => "INTERMENSTRUAL_BLEEDING",
            MenstruationFlow => "MENSTRUATION_FLOW",
            MenstruationPeriod => "MENSTRUATION_PERIOD",
            OvulationTest => "OVULATION_TEST",
            SexualActivity => "SEXUAL_ACTIVITY",
            Hydration => "HYDRATION",
            Nutrition => "NUTRITION",
            Sleep => "SLEEP",
            BasalBodyTemperature => "BASAL_BODY_TEMPERATURE",
            BloodGlucose => "BLOOD_GLUCOSE",
            BloodPressure => "BLOOD_PRESSURE",
            BodyTemperature => "BODY_TEMPERATURE",
            HeartRate => "HEART_RATE",
            HeartRateVariability => "HEART_RATE_VARIABILITY",
            OxygenSaturation => "OXYGEN_SATURATION",
            RespiratoryRate => "RESPIRATORY_RATE",
            RestingHeartRate => "RESTING_HEART_RATE",
            SkinTemperature => "SKIN_TEMPERATURE",
            Mindfulness => "MINDFULNESS",
        }
    }
}

impl FromStr for DataType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        DataType::ALL
            .iter()
            .copied()
            .find(|data_type| data_type.as_str() == value)
            .ok_or_else(|| anyhow!("unknown data type '{value}'"))
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
