use std::fs;

use tempfile::tempdir;

use figura::config::OutputFormat;
use figura_cli::{Args, completion_message, run};

fn args_for(output_dir: &str, diagrams: &[&str], config: Option<String>) -> Args {
    Args {
        output_dir: output_dir.to_string(),
        format: Some(OutputFormat::Svg),
        diagrams: diagrams.iter().map(|name| name.to_string()).collect(),
        config,
        log_level: "off".to_string(),
    }
}

#[test]
fn e2e_smoke_test_all_builtin_diagrams() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let out_dir = temp_dir.path().join("nested").join("out");
    let args = args_for(&out_dir.to_string_lossy(), &[], None);

    let generated = run(&args).expect("All built-in diagrams should generate");
    assert_eq!(generated.len(), figura::catalog::builtin().len());

    let mut files: Vec<String> = fs::read_dir(&out_dir)
        .expect("Output directory should be created")
        .flatten()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            "Analytical_Workflow_Scheme.svg",
            "Data_Synthesis_Framework_Scheme.svg",
            "General_War_Induced_Soil_Investigation_Scheme.svg",
            "Integration_Workflow_Scheme.svg",
            "Knowledge_Synthesis_Scheme.svg",
            "Multiscale_Integration_Scheme.svg",
            "Publication_Framework_Scheme.svg",
            "Risk_Assessment_Decision_Matrix_Scheme.svg",
            "Sampling_Strategy_Scheme.svg",
            "Schema_Equipment_Network.svg",
            "Schema_Main_Flowchart.svg",
            "Schema_Parameter_Analysis.svg",
            "Schema_Site_Layout.svg",
            "Temporal_Monitoring_Scheme.svg",
        ]
    );

    let message = completion_message(&generated);
    assert!(message.starts_with("Generated files:"));
    assert!(message.contains(
        "1. General_War_Induced_Soil_Investigation_Scheme.svg - Comprehensive methodology framework"
    ));
    assert!(message.contains("2. Sampling_Strategy_Scheme.svg - Detailed sampling protocols"));
    assert!(message.contains("3. Analytical_Workflow_Scheme.svg - Complete analytical workflow"));
    assert!(message.contains(
        "4. Risk_Assessment_Decision_Matrix_Scheme.svg - Risk scoring matrix and management decisions"
    ));
    assert!(message.contains("14. Schema_Site_Layout.svg - Sampling sites and soil context"));
}

#[test]
fn e2e_smoke_test_config_file_and_filter() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[render]\ndpi = 20.0\nbackground = \"none\"\n\n[palette]\nstrategy = \"#123456\"\n",
    )
    .unwrap();

    let out_dir = temp_dir.path().join("out");
    let args = args_for(
        &out_dir.to_string_lossy(),
        &["sampling_strategy"],
        Some(config_path.to_string_lossy().into_owned()),
    );

    let generated = run(&args).expect("Filtered generation should succeed");
    assert_eq!(generated.len(), 1);

    let image = generated[0].image();
    // 16 x 12 inch figure at 20 dpi
    assert_eq!((image.width(), image.height()), (320, 240));
    assert!(fs::metadata(image.path()).unwrap().len() > 0);
}

#[test]
fn e2e_smoke_test_unknown_diagram_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = args_for(&temp_dir.path().to_string_lossy(), &["nope"], None);

    let result = run(&args);
    assert!(result.is_err(), "Unknown diagram name should fail");
}

#[test]
fn e2e_smoke_test_missing_config_fails() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("missing.toml");
    let args = args_for(
        &temp_dir.path().to_string_lossy(),
        &[],
        Some(missing.to_string_lossy().into_owned()),
    );

    assert!(run(&args).is_err(), "Missing explicit config should fail");
}
