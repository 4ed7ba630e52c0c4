use camstack_layers::{guess_layer_class, sort_layers, HintTable, InternalLayer, LayerClass, PcbLayer};
use proptest::prelude::*;

fn class_strategy() -> impl Strategy<Value = LayerClass> {
    prop::sample::select(LayerClass::ALL.to_vec())
}

proptest! {
    #[test]
    fn classification_never_panics(name in "\\PC{0,40}") {
        let _ = guess_layer_class(&name);
    }

    #[test]
    fn extension_decides_over_any_stem(stem in "[a-z_]{1,12}") {
        // Every built-in extension belongs to exactly one hint.
        for hint in HintTable::builtin().hints() {
            for ext in &hint.extensions {
                let name = format!("{}.{}", stem, ext);
                prop_assert_eq!(guess_layer_class(&name), hint.layer);
            }
        }
    }

    #[test]
    fn directories_do_not_change_the_result(
        dir in "[A-Za-z0-9_]{1,10}",
        name in "[A-Za-z0-9_.]{1,16}",
    ) {
        prop_assert_eq!(
            guess_layer_class(&format!("{}/{}", dir, name)),
            guess_layer_class(&name)
        );
    }

    #[test]
    fn sort_keeps_only_stack_and_appended_layers(
        classes in prop::collection::vec(class_strategy(), 0..24),
        from_top in any::<bool>(),
    ) {
        let input: Vec<PcbLayer> = classes.iter().map(|&c| PcbLayer::new(c, None)).collect();
        let sorted = sort_layers(input, from_top);

        let expected = classes
            .iter()
            .filter(|c| !matches!(c, LayerClass::IpcNetlist | LayerClass::Unknown))
            .count();
        prop_assert_eq!(sorted.len(), expected);

        // Drill and drawing layers form the tail, drills first.
        let tail: Vec<LayerClass> = sorted
            .iter()
            .map(PcbLayer::layer_class)
            .skip_while(|c| !matches!(c, LayerClass::Drill | LayerClass::Drawing))
            .collect();
        let mut expected_tail = tail.clone();
        expected_tail.sort();
        prop_assert_eq!(&tail, &expected_tail);
        prop_assert!(tail.iter().all(|c| matches!(c, LayerClass::Drill | LayerClass::Drawing)));

        // The stack itself is monotonic in the chosen direction.
        let stack: Vec<LayerClass> = sorted
            .iter()
            .map(PcbLayer::layer_class)
            .take_while(|c| !matches!(c, LayerClass::Drill | LayerClass::Drawing))
            .collect();
        let monotonic = stack.windows(2).all(|w| if from_top { w[0] <= w[1] } else { w[0] >= w[1] });
        prop_assert!(monotonic);
    }

    #[test]
    fn internal_layers_sort_by_order(orders in prop::collection::vec(0u32..50, 0..12)) {
        let input: Vec<PcbLayer> = orders
            .iter()
            .map(|&o| PcbLayer::Internal(InternalLayer::new(None, o)))
            .collect();
        let sorted: Vec<u32> = sort_layers(input, true)
            .iter()
            .filter_map(PcbLayer::order)
            .collect();

        let mut expected = orders.clone();
        expected.sort();
        prop_assert_eq!(sorted, expected);
    }
}
