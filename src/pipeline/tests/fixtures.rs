//! Builders for in-memory results exports

use crate::pipeline::{Dataset, load_dataset_from_bytes};

/// Full legacy header, including columns the loader does not keep
pub const LEGACY_HEADER: &str = "Name,Sex,Event,Equipment,Age,AgeClass,BirthYearClass,Division,\
Bodyweight,WeightClass,Squat1,Squat2,Squat3,Squat4,SquatBest,Bench1,Bench2,Bench3,Bench4,\
BenchBest,Deadlift1,Deadlift2,Deadlift3,Deadlift4,DeadliftBest,Total,Place,Dots,Wilks,\
Glossbrenner,Goodlift,Tested,Country,Federation,ParentFederation,Date,MeetCountry,MeetState,\
MeetTown,Meet";

/// One entry of a fixture export
#[derive(Debug, Clone)]
pub struct FixtureRow {
    pub name: String,
    pub sex: String,
    pub event: String,
    pub equipment: String,
    pub bodyweight: Option<f64>,
    pub weight_class: String,
    pub squat: Option<f64>,
    pub bench: Option<f64>,
    pub deadlift: Option<f64>,
    pub total: Option<f64>,
    pub wilks: Option<f64>,
    pub federation: String,
    pub date: String,
    pub meet: String,
}

impl FixtureRow {
    /// A complete raw SBD entry with plausible numbers
    pub fn new(name: &str, sex: &str, bodyweight: f64) -> Self {
        Self {
            name: name.to_string(),
            sex: sex.to_string(),
            event: "SBD".to_string(),
            equipment: "Raw".to_string(),
            bodyweight: Some(bodyweight),
            weight_class: "999".to_string(),
            squat: Some(200.0),
            bench: Some(120.0),
            deadlift: Some(250.0),
            total: Some(570.0),
            wilks: Some(380.0),
            federation: "USAPL".to_string(),
            date: "2020-01-01".to_string(),
            meet: "Test Open".to_string(),
        }
    }

    pub fn equipment(mut self, equipment: &str) -> Self {
        self.equipment = equipment.to_string();
        self
    }

    pub fn event(mut self, event: &str) -> Self {
        self.event = event.to_string();
        self
    }

    pub fn squat(mut self, squat: Option<f64>) -> Self {
        self.squat = squat;
        self
    }

    pub fn bench(mut self, bench: Option<f64>) -> Self {
        self.bench = bench;
        self
    }

    pub fn deadlift(mut self, deadlift: Option<f64>) -> Self {
        self.deadlift = deadlift;
        self
    }

    pub fn total(mut self, total: Option<f64>) -> Self {
        self.total = total;
        self
    }

    pub fn wilks(mut self, wilks: f64) -> Self {
        self.wilks = Some(wilks);
        self
    }

    pub fn bodyweight(mut self, bodyweight: Option<f64>) -> Self {
        self.bodyweight = bodyweight;
        self
    }

    pub fn weight_class(mut self, weight_class: &str) -> Self {
        self.weight_class = weight_class.to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = date.to_string();
        self
    }

    pub fn meet(mut self, meet: &str) -> Self {
        self.meet = meet.to_string();
        self
    }

    fn to_csv_line(&self) -> String {
        let num = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
        let attempt = |best: Option<f64>, offset: f64| num(best.map(|b| b - offset));

        let fields: Vec<String> = vec![
            self.name.clone(),
            self.sex.clone(),
            self.event.clone(),
            self.equipment.clone(),
            "28".to_string(),
            "24-34".to_string(),
            "24-39".to_string(),
            "Open".to_string(),
            num(self.bodyweight),
            self.weight_class.clone(),
            attempt(self.squat, 10.0),
            attempt(self.squat, 5.0),
            num(self.squat),
            String::new(),
            num(self.squat),
            attempt(self.bench, 5.0),
            attempt(self.bench, 2.5),
            num(self.bench),
            String::new(),
            num(self.bench),
            attempt(self.deadlift, 15.0),
            attempt(self.deadlift, 7.5),
            num(self.deadlift),
            String::new(),
            num(self.deadlift),
            num(self.total),
            "1".to_string(),
            "400.5".to_string(),
            num(self.wilks),
            "380.1".to_string(),
            "80.2".to_string(),
            "Yes".to_string(),
            "USA".to_string(),
            self.federation.clone(),
            "IPF".to_string(),
            self.date.clone(),
            "USA".to_string(),
            "CA".to_string(),
            "Sacramento".to_string(),
            format!("\"{}\"", self.meet),
        ];
        fields.join(",")
    }
}

/// Render rows as a legacy-layout CSV export
pub fn export_csv(rows: &[FixtureRow]) -> String {
    let mut csv = String::from(LEGACY_HEADER);
    csv.push('\n');
    for row in rows {
        csv.push_str(&row.to_csv_line());
        csv.push('\n');
    }
    csv
}

/// Load rows through the real loader
pub fn load_rows(rows: &[FixtureRow]) -> Dataset {
    load_dataset_from_bytes(export_csv(rows).into_bytes(), "fixture").unwrap()
}
