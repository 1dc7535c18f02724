//! Smoke test to verify basic functionality

use labeval::{describe, evaluate, Classification, ParameterPanel, PatientSex};

#[test]
fn smoke_test_panel_to_descriptor() {
    let panel = ParameterPanel::from_yaml(
        r#"
id: glucose
parameters:
  - name: Glucose
    unit: mg/dL
    reference_min_male: "70"
    reference_max_male: "100"
"#,
    )
    .unwrap();

    let glucose = panel.get_parameter("Glucose").unwrap();
    let evaluation = evaluate(glucose, "95", PatientSex::normalize(""));

    assert_eq!(evaluation.classification, Classification::Normal);
    assert_eq!(evaluation.descriptor, describe(Classification::Normal));
    assert_eq!(evaluation.descriptor.label, "Normal");
}
