use anyhow::Result;
use ascir_generator::{generate, GeneratorSettings};

use crate::common::{assert_contains, fixture_path};
use crate::stubs::stub_registry;

#[test]
fn missing_settings_file_uses_defaults() -> Result<()> {
    let settings = GeneratorSettings::load(&fixture_path("does_not_exist.json"))?;
    assert_eq!(settings, GeneratorSettings::default());
    assert_eq!(settings.op_namespace(), "ascir_op");
    Ok(())
}

#[test]
fn settings_file_under_ascir_key() -> Result<()> {
    let settings = GeneratorSettings::load(&fixture_path("settings.json"))?;
    assert_eq!(settings.namespaces, vec!["air", "ops", "asc"]);
    assert_eq!(settings.header_guard, "AIR_ASC_OPS_H");
    assert_eq!(settings.soc_version_buffer_len, 64);
    assert_eq!(settings.cg_namespace, "builder");
    // absent keys keep their defaults
    assert_eq!(settings.base_include, "ascir_op_base.h");
    assert_eq!(settings.op_namespace(), "asc");
    Ok(())
}

#[test]
fn top_level_settings_are_accepted() -> Result<()> {
    let settings = GeneratorSettings::from_json(r#"{"header_guard": "OPS_H", "unrelated": 1}"#)?;
    assert_eq!(settings.header_guard, "OPS_H");
    assert_eq!(settings.namespaces, GeneratorSettings::default().namespaces);
    Ok(())
}

#[test]
fn invalid_settings_are_rejected() -> Result<()> {
    assert!(GeneratorSettings::from_json(r#"{"namespaces": []}"#).is_err());
    assert!(GeneratorSettings::from_json(r#"{"ascir": {"soc_version_buffer_len": 0}}"#).is_err());
    assert!(GeneratorSettings::from_json(r#"{"soc_version_buffer_len": "wide"}"#).is_err());
    assert!(GeneratorSettings::from_json("not json").is_err());

    let settings = GeneratorSettings {
        namespaces: Vec::new(),
        ..GeneratorSettings::default()
    };
    assert!(generate(&stub_registry()?, &settings).is_err());
    Ok(())
}

#[test]
fn settings_shape_the_header() -> Result<()> {
    let settings = GeneratorSettings::load(&fixture_path("settings.json"))?;
    let generated = generate(&stub_registry()?, &settings)?;
    let header = &generated.header;
    assert!(header.contains("#ifndef AIR_ASC_OPS_H\n#define AIR_ASC_OPS_H\n"));
    assert_contains(header, "namespace air {\nnamespace ops {\nnamespace asc {")?;
    assert_contains(header, "char soc_version[64] = {};\n    auto res = rtGetSocVersion(soc_version, 64U);")?;
    assert_contains(header, "}  // namespace asc\n\nnamespace builder {")?;
    assert_contains(header, "Create<asc::StubOp8>(name);")?;
    assert!(header.ends_with(
        "}  // namespace builder\n}  // namespace ops\n}  // namespace air\n\n#endif  // AIR_ASC_OPS_H\n"
    ));
    Ok(())
}
