//! Architecture contract tests.

mod support;

use support::architecture::{
    find_lines_containing, find_lines_containing_except_files, find_non_export_lines_in_mod_files,
    path_exists, read_relative,
};

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
            "tracing::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    for dir in [
        "src/adapter",
        "src/application",
        "src/infrastructure",
        "src/port",
        "src/testkit",
    ] {
        let violations = find_non_export_lines_in_mod_files(dir);
        assert!(
            violations.is_empty(),
            "found non-export content in mod.rs files: {violations:#?}"
        );
    }
}

#[test]
fn cli_operator_bridge_uses_operator_name() {
    let source = read_relative("src/adapter/inbound/cli/operator.rs");
    assert!(
        source.contains("pub fn operator() -> Result<&'static dyn OperatorPort>"),
        "operator bridge should expose a fallible `operator()` capability accessor"
    );
}

#[test]
fn only_the_binary_installs_the_operator() {
    let hits = find_lines_containing_except_files(
        "src",
        &["operator::install("],
        &["src/main.rs"],
    );
    assert!(
        hits.is_empty(),
        "operator should only be installed by the binary entry point: {hits:#?}"
    );
}

#[test]
fn llm_contract_lives_in_outbound_port() {
    assert!(
        path_exists("src/port/outbound/llm.rs"),
        "LLM trait contract should live under port/outbound"
    );

    let semantic = read_relative("src/application/scoring/semantic.rs");
    assert!(
        !semantic.contains("crate::adapter::outbound::llm"),
        "semantic scorer should not depend on llm adapter modules directly"
    );
    assert!(
        semantic.contains("crate::port::outbound::llm::Llm"),
        "semantic scorer should depend on the outbound llm port contract"
    );
}

#[test]
fn scorer_and_source_contracts_live_in_outbound_port() {
    for file in ["src/port/outbound/scorer.rs", "src/port/outbound/source.rs"] {
        assert!(path_exists(file), "expected outbound port `{file}`");
    }
}

#[test]
fn operator_ports_are_transport_agnostic() {
    let hits = find_lines_containing("src/port/inbound/operator", &["std::path::Path", "PathBuf"]);
    assert!(
        hits.is_empty(),
        "operator inbound ports should not expose filesystem path types: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_direct_adapter_imports() {
    let hits = find_lines_containing("src/application", &["crate::adapter::"]);
    assert!(
        hits.is_empty(),
        "application layer should not import adapters directly: {hits:#?}"
    );
}

#[test]
fn application_layer_has_no_infrastructure_imports() {
    let hits = find_lines_containing("src/application", &["crate::infrastructure"]);
    assert!(
        hits.is_empty(),
        "application layer should take plain values, not config types: {hits:#?}"
    );
}

#[test]
fn application_layer_does_no_network_io() {
    let hits = find_lines_containing("src/application", &["reqwest::", "std::fs::"]);
    assert!(
        hits.is_empty(),
        "application layer should stay free of network and filesystem access: {hits:#?}"
    );
}

#[test]
fn factory_is_split_by_concern() {
    for file in [
        "src/infrastructure/factory/llm.rs",
        "src/infrastructure/factory/scorer.rs",
        "src/infrastructure/factory/pipeline.rs",
        "src/infrastructure/factory/tests.rs",
    ] {
        assert!(path_exists(file), "expected factory module `{file}`");
    }
}

#[test]
fn operator_is_split_by_capability() {
    for file in [
        "src/infrastructure/operator/config.rs",
        "src/infrastructure/operator/pipeline.rs",
        "src/infrastructure/operator/entry.rs",
    ] {
        assert!(path_exists(file), "expected operator module `{file}`");
    }

    let port = read_relative("src/port/inbound/operator/port.rs");
    assert!(
        port.contains("ConfigurationOperator + PipelineOperator"),
        "operator port should compose the capability traits"
    );
}
