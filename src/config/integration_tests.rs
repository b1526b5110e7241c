#[cfg(test)]
mod integration_tests {
    use std::sync::Arc;

    use crate::component::ScalingDecision;
    use crate::config::{load_and_validate_config, MachineBuilder, ReplicaPolicy};
    use crate::environment::test_environment;
    use crate::machine::MachineStatus;
    use crate::observability::messages::tags;
    use crate::observability::MemorySink;

    /// Test that the sample pipeline loads and validates
    #[test]
    fn test_ingest_pipeline_yaml_loading() {
        let config = load_and_validate_config("configs/ingest-pipeline.yaml").unwrap();

        assert_eq!(config.machine_id, "m1");
        assert_eq!(config.history.retention, Some(500));
        assert_eq!(config.replicas, ReplicaPolicy::LogOnly);
        assert_eq!(config.composites.len(), 2);
        assert_eq!(config.composites[0].components.len(), 3);
        assert_eq!(config.composites[0].connections.len(), 2);
        assert_eq!(config.links.len(), 1);
    }

    /// Test building a machine from the sample pipeline
    #[test]
    fn test_build_machine_from_yaml() {
        let config = load_and_validate_config("configs/ingest-pipeline.yaml").unwrap();
        let sink = Arc::new(MemorySink::new());

        let machine =
            MachineBuilder::from_config(&config, Arc::new(test_environment()), sink.clone())
                .unwrap();

        assert_eq!(machine.id(), "m1");
        assert_eq!(machine.status(), MachineStatus::Active);
        assert_eq!(machine.connections().get("c1"), Some(&vec!["c2".to_string()]));

        let c1 = machine.composite("c1").unwrap();
        let ingest = c1.component("ingest").unwrap();
        let transform = c1.component("transform").unwrap();
        let validate = c1.component("validate").unwrap();

        assert_eq!(
            validate.lineage(),
            &["ingest".to_string(), "transform".to_string(), "validate".to_string()]
        );
        assert_eq!(c1.resolve_parents(transform)[0].id(), ingest.id());
        assert_eq!(ingest.assigned_workload(), 10);
        assert_eq!(validate.assigned_workload(), 0);
        assert_eq!(
            ingest.connected_components().get(transform.id()).map(String::as_str),
            Some("transform")
        );
        assert_eq!(ingest.composite_id(), Some("c1"));
        assert_eq!(ingest.machine_id(), Some("m1"));
        assert_eq!(ingest.settings().retention, Some(500));

        // every component announced itself through the shared sink
        assert_eq!(sink.with_tag(tags::INITIALIZATION).len(), 4);
    }

    /// Test that the replica policy and thresholds reach the components
    #[test]
    fn test_replicating_pipeline_scales_with_child_replicas() {
        let config = load_and_validate_config("configs/replicating-pipeline.yaml").unwrap();
        let machine = MachineBuilder::from_config(
            &config,
            Arc::new(test_environment()),
            Arc::new(MemorySink::new()),
        )
        .unwrap();

        let dispatcher = machine
            .composite("workers")
            .and_then(|c| c.component("dispatcher"))
            .unwrap();
        assert_eq!(dispatcher.settings().thresholds.scaling_up_factor, 1.1);

        // 115 > 100 * 1.1
        dispatcher.set_current_workload(115);
        assert_eq!(dispatcher.detect_scaling_need(), ScalingDecision::ScaleUp);
        assert_eq!(dispatcher.replicas().len(), 1);
        assert_eq!(dispatcher.replicas()[0].reason(), "dispatch");

        // 115 is not above 100 * 2.0
        assert!(!dispatcher.is_workload_dangerous());
    }

    /// Test that shutdown reaches every composite of a built machine
    #[test]
    fn test_shutdown_of_built_machine() {
        let config = load_and_validate_config("configs/ingest-pipeline.yaml").unwrap();
        let mut machine = MachineBuilder::from_config(
            &config,
            Arc::new(test_environment()),
            Arc::new(MemorySink::new()),
        )
        .unwrap();

        machine.shutdown();

        assert_eq!(machine.status(), MachineStatus::Terminated);
        assert!(machine.composites().values().all(|c| !c.is_active()));
    }
}
