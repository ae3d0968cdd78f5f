use small_tools::{convert, transform, CaseMode, CaseOptions};

const SAMPLES: [&str; 5] = [
    "The quick brown fox jumps over the lazy dog. This sentence contains all letters.",
    "Hello World! Welcome to our Case Changer tool. You can convert text instantly.",
    "javascript is awesome. react and vue are popular frameworks. node.js for backend development.",
    "USER_PROFILE_DATA, customerFirstName, OrderTotalAmount, product_category_list",
    "multi line\ntext here. and more\n\nend",
];

fn plain() -> CaseOptions {
    CaseOptions {
        preserve_line_breaks: false,
        ..CaseOptions::default()
    }
}

#[test]
fn test_title_case_example() {
    assert_eq!(
        transform("the Quick BROWN fox", CaseMode::Title, &plain()),
        "The Quick Brown Fox"
    );
}

#[test]
fn test_identifier_examples() {
    let options = plain();
    assert_eq!(transform("hello world", CaseMode::Snake, &options), "hello_world");
    assert_eq!(transform("Hello, World!", CaseMode::Kebab, &options), "hello-world");
    assert_eq!(transform("Hello World", CaseMode::Camel, &options), "helloWorld");
    assert_eq!(transform("hello world", CaseMode::Pascal, &options), "HelloWorld");
    assert_eq!(transform("Hello World", CaseMode::Dot, &options), "hello.world");
    assert_eq!(
        transform("customerFirstName", CaseMode::Snake, &options),
        "customerfirstname"
    );
    assert_eq!(
        transform("HTTPServer error", CaseMode::Kebab, &options),
        "httpserver-error"
    );
    assert_eq!(
        transform("customerFirstName total", CaseMode::Camel, &options),
        "customerFirstNameTotal"
    );
}

#[test]
fn test_separator_runs_collapse() {
    let options = plain();
    assert_eq!(transform("a __ b", CaseMode::Snake, &options), "a_b");
    assert_eq!(transform("a - - b", CaseMode::Kebab, &options), "a-b");
    assert_eq!(transform("a...b", CaseMode::Dot, &options), "a.b");
}

#[test]
fn test_dedupe_lines_keeps_first_seen_order() {
    let options = CaseOptions {
        dedupe_lines: true,
        preserve_line_breaks: true,
        ..CaseOptions::default()
    };
    assert_eq!(transform("b\na\nb\na", CaseMode::Upper, &options), "B\nA");
}

#[test]
fn test_collapse_whitespace() {
    let options = CaseOptions {
        collapse_whitespace: true,
        ..CaseOptions::default()
    };
    assert_eq!(transform("  a \t b \n c  ", CaseMode::Upper, &options), "A B C");
}

#[test]
fn test_preserve_line_breaks_keeps_sentences_per_line() {
    let text = "first line\nsecond line";
    assert_eq!(
        transform(text, CaseMode::Sentence, &CaseOptions::default()),
        "First line\nSecond line"
    );
    assert_eq!(
        transform(text, CaseMode::Sentence, &plain()),
        "First line\nsecond line"
    );
    assert_eq!(
        transform(text, CaseMode::Snake, &CaseOptions::default()),
        "first_line\nsecond_line"
    );
    assert_eq!(
        transform(text, CaseMode::Snake, &plain()),
        "first_line_second_line"
    );
}

#[test]
fn test_upper_then_lower_matches_lowercase() {
    for s in ["aBcDeF", "HELLO", "world", "MiXeDcAsE", "z", ""] {
        let options = CaseOptions::default();
        let round_trip = transform(
            &transform(s, CaseMode::Upper, &options),
            CaseMode::Lower,
            &options,
        );
        assert_eq!(round_trip, s.to_lowercase(), "input: {:?}", s);
    }
}

#[test]
fn test_modes_are_idempotent() {
    let options = CaseOptions::default();
    for mode in CaseMode::ALL {
        if matches!(mode, CaseMode::Inverse | CaseMode::Alternating) {
            continue;
        }
        for sample in SAMPLES {
            let once = transform(sample, mode, &options);
            let twice = transform(&once, mode, &options);
            assert_eq!(once, twice, "mode {} on {:?}", mode, sample);
        }
    }
}

#[test]
fn test_inverse_twice_restores_input() {
    let options = CaseOptions::default();
    assert_eq!(
        transform("Hello World 42!", CaseMode::Inverse, &options),
        "hELLO wORLD 42!"
    );
    for sample in SAMPLES {
        let once = transform(sample, CaseMode::Inverse, &options);
        assert_ne!(once, sample);
        assert_eq!(transform(&once, CaseMode::Inverse, &options), sample);
    }
}

#[test]
fn test_alternating_depends_only_on_position() {
    let options = CaseOptions::default();
    assert_eq!(
        transform("hello world", CaseMode::Alternating, &options),
        "hElLo wOrLd"
    );
    assert_eq!(
        transform("HELLO WORLD", CaseMode::Alternating, &options),
        "hElLo wOrLd"
    );

    // 逐行處理時每行的位置從 0 重新計算
    assert_eq!(transform("ab\ncd", CaseMode::Alternating, &options), "aB\ncD");
    assert_eq!(transform("ab\ncd", CaseMode::Alternating, &plain()), "aB\nCd");

    for sample in SAMPLES {
        let once = transform(sample, CaseMode::Alternating, &options);
        assert_eq!(transform(&once, CaseMode::Alternating, &options), once);
    }
}

#[test]
fn test_single_letter_words_merge_on_reapplied_pascal() {
    let options = plain();
    let once = transform("a b", CaseMode::Pascal, &options);
    assert_eq!(once, "AB");
    assert_eq!(transform(&once, CaseMode::Pascal, &options), "Ab");
}

#[test]
fn test_empty_and_blank_input() {
    let options = CaseOptions::default();
    for mode in CaseMode::ALL {
        assert_eq!(transform("", mode, &options), "", "mode {}", mode);
    }
    assert_eq!(transform("   ", CaseMode::Upper, &options), "   ");
    assert_eq!(transform("   ", CaseMode::Title, &options), "   ");
    assert_eq!(transform("   ", CaseMode::Snake, &options), "");
}

#[test]
fn test_convert_reports_lengths_and_stats() {
    let result = convert("Hello World\nbye", CaseMode::Upper, &CaseOptions::default());
    assert_eq!(result.converted_text, "HELLO WORLD\nBYE");
    assert_eq!(result.input_length, 15);
    assert_eq!(result.output_length, 15);
    assert_eq!(result.input_stats.words, 3);
    assert_eq!(result.input_stats.lines, 2);

    // ß 轉大寫變成兩個字元
    let result = convert("straße", CaseMode::Upper, &CaseOptions::default());
    assert_eq!(result.converted_text, "STRASSE");
    assert_eq!((result.input_length, result.output_length), (6, 7));
}

#[test]
fn test_mode_names_round_trip() {
    for mode in CaseMode::ALL {
        assert_eq!(mode.as_str().parse::<CaseMode>().unwrap(), mode);
    }
    assert!("shouting".parse::<CaseMode>().is_err());
}
