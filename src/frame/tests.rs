//! Unit tests for frame helpers

use super::*;

fn plays() -> DataFrame {
    df!(
        "game_id" => ["g1", "g2", "g3", "g4"],
        "epa" => [Some("0.31"), Some("NA"), None, Some("-1.2")],
        "is_active" => [Some("TRUE"), Some("FALSE"), Some("true"), None],
    )
    .unwrap()
}

fn keep(frame: &DataFrame, predicate: Expr) -> Vec<Option<String>> {
    let kept = frame.clone().lazy().filter(predicate).collect().unwrap();
    text_values(&kept, "game_id").unwrap()
}

#[cfg(test)]
mod predicate_tests {
    use super::*;

    #[test]
    fn test_present_on_text() {
        let frame = plays();
        assert_eq!(
            keep(&frame, present(&frame, "epa")),
            vec![Some("g1".to_string()), Some("g4".to_string())]
        );
    }

    #[test]
    fn test_present_on_numbers() {
        let frame = df!(
            "game_id" => ["g1", "g2"],
            "epa" => [Some(0.0), None],
        )
        .unwrap();
        assert_eq!(keep(&frame, present(&frame, "epa")), vec![Some("g1".to_string())]);
    }

    #[test]
    fn test_truthy_on_text_and_bool() {
        let frame = plays();
        assert_eq!(
            keep(&frame, truthy(&frame, "is_active")),
            vec![Some("g1".to_string()), Some("g3".to_string())]
        );

        let typed = df!(
            "game_id" => ["a", "b"],
            "is_active" => [true, false],
        )
        .unwrap();
        assert_eq!(keep(&typed, truthy(&typed, "is_active")), vec![Some("a".to_string())]);
    }

    #[test]
    fn test_absent_column_matches_nothing() {
        let frame = plays();
        assert!(keep(&frame, present(&frame, "wpa")).is_empty());
        assert!(keep(&frame, truthy(&frame, "is_rookie")).is_empty());
    }
}

#[cfg(test)]
mod helper_tests {
    use super::*;

    #[test]
    fn test_numeric_parses_text() {
        let frame = df!("x" => ["1e3", "0.50", "NA", "n/a"]).unwrap();
        let parsed = frame.lazy().select([numeric("x")]).collect().unwrap();
        assert_eq!(
            float_values(&parsed, "x").unwrap(),
            vec![Some(1000.0), Some(0.5), None, None]
        );
    }

    #[test]
    fn test_stack_unions_columns() {
        let passing = df!(
            "player" => ["A"],
            "avg_time_to_throw" => ["2.7"],
        )
        .unwrap();
        let receiving = df!(
            "player" => ["B"],
            "avg_separation" => ["3.1"],
        )
        .unwrap();

        let combined = stack(&[passing, receiving]).unwrap();

        assert_eq!(
            column_names(&combined),
            vec!["player", "avg_time_to_throw", "avg_separation"]
        );
        assert_eq!(combined.height(), 2);
        assert_eq!(
            text_values(&combined, "avg_time_to_throw").unwrap(),
            vec![Some("2.7".to_string()), None]
        );
    }

    #[test]
    fn test_stack_edge_cases() {
        assert_eq!(stack(&[]).unwrap().height(), 0);
        let only = plays();
        assert!(stack(&[only.clone()]).unwrap().equals_missing(&only));
    }

    #[test]
    fn test_rename_column() {
        let frame = df!(
            "gsis_id" => ["00-0033873"],
            "display_name" => ["Patrick Mahomes"],
        )
        .unwrap();

        let renamed = rename_column(&frame, "gsis_id", "player_id").unwrap();

        assert_eq!(column_names(&renamed), vec!["player_id", "display_name"]);
        assert!(!has_column(&renamed, "gsis_id"));
        assert!(rename_column(&frame, "nope", "x").unwrap().equals_missing(&frame));
        // the source frame is untouched
        assert!(has_column(&frame, "gsis_id"));
    }
}
