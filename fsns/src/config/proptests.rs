//! Property-based tests for configuration system.

use super::merger::ConfigMerger;
use super::schema::{Config, OutputFormat};
use crate::class_id::ClassId;
use crate::folder::Column;
use proptest::prelude::*;

fn column_strategy() -> impl Strategy<Value = Column> {
    prop::sample::select(Column::ALL.to_vec())
}

fn format_strategy() -> impl Strategy<Value = OutputFormat> {
    prop::sample::select(vec![
        OutputFormat::Table,
        OutputFormat::Json,
        OutputFormat::Csv,
        OutputFormat::Tsv,
    ])
}

fn classes_strategy() -> impl Strategy<Value = Vec<ClassId>> {
    prop::collection::vec((1u128..64).prop_map(ClassId::from_u128), 0..6)
}

fn config_strategy() -> impl Strategy<Value = Config> {
    (
        prop::option::of(any::<bool>()),
        prop::option::of(any::<bool>()),
        prop::option::of(column_strategy()),
        prop::option::of("[a-z]{1,12}\\.ini"),
        prop::option::of("[a-z]{1,4}"),
        prop::option::of(classes_strategy()),
        prop::option::of(format_strategy()),
    )
        .prop_map(
            |(hide, hidden, column, sidecar, shortcut, classes, format)| Config {
                hide_extensions: hide,
                show_hidden: hidden,
                sort_column: column,
                sidecar_name: sidecar,
                shortcut_extension: shortcut,
                filesystem_classes: classes,
                output_format: format,
                ..Default::default()
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn merge_higher_precedence_wins(low in config_strategy(), high in config_strategy()) {
        let mut result = low.clone();
        ConfigMerger::merge_into(&mut result, &high);

        prop_assert_eq!(result.hide_extensions, high.hide_extensions.or(low.hide_extensions));
        prop_assert_eq!(result.show_hidden, high.show_hidden.or(low.show_hidden));
        prop_assert_eq!(result.sort_column, high.sort_column.or(low.sort_column));
        prop_assert_eq!(
            result.sidecar_name.clone(),
            high.sidecar_name.clone().or(low.sidecar_name.clone())
        );
        prop_assert_eq!(result.output_format, high.output_format.or(low.output_format));
    }

    #[test]
    fn merge_with_default_is_identity(config in config_strategy()) {
        let mut result = config.clone();
        ConfigMerger::merge_into(&mut result, &Config::default());
        prop_assert_eq!(result, config);
    }

    #[test]
    fn merged_classes_are_a_deduplicated_union(
        low in classes_strategy(),
        high in classes_strategy()
    ) {
        let mut result = Config { filesystem_classes: Some(low.clone()), ..Default::default() };
        ConfigMerger::merge_into(
            &mut result,
            &Config { filesystem_classes: Some(high.clone()), ..Default::default() },
        );
        let merged = result.filesystem_classes.unwrap_or_default();

        for class in low.iter().chain(high.iter()) {
            prop_assert!(merged.contains(class));
        }
        for class in &high {
            prop_assert_eq!(merged.iter().filter(|c| *c == class).count(),
                low.iter().filter(|c| *c == class).count().max(1));
        }
    }

    #[test]
    fn yaml_round_trip(config in config_strategy()) {
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        prop_assert_eq!(parsed, config);
    }
}
