//! Library-level checks of the strip pipeline, marker style: each input
//! carries a unique token inside a comment that must never survive.

use decomment::strip::{StripError, remove_comments};

struct Case {
    name: &'static str,
    input: &'static str,
    marker: &'static str,
}

#[test]
fn comment_markers_never_survive() {
    let cases = [
        Case {
            name: "single line comment in a full file",
            input: "// uniqueLineMarker\nfn main() {\n    println!(\"hi\");\n}\n",
            marker: "uniqueLineMarker",
        },
        Case {
            name: "multi line comment in a full file",
            input: "/*\nuniqueBlockMarker spans\nlines\n*/\nfn main() {}\n",
            marker: "uniqueBlockMarker",
        },
        Case {
            name: "doc comments",
            input: "//! uniqueInnerDocMarker\n/// uniqueOuterDocMarker\nfn f() {}\n",
            marker: "uniqueInnerDocMarker",
        },
        Case {
            name: "snippet without any item",
            input: "// uniqueSnippetMarker\nlet answer = 42;\n",
            marker: "uniqueSnippetMarker",
        },
        Case {
            name: "comment nested deep in a function",
            input: "fn f() {\n    if true {\n        // uniqueNestedMarker\n        return;\n    }\n}\n",
            marker: "uniqueNestedMarker",
        },
    ];

    for case in cases {
        let out = remove_comments(case.input)
            .unwrap_or_else(|err| panic!("{}: unexpected error: {err}", case.name));
        assert!(
            !out.contains(case.marker),
            "{}: marker {:?} survived in output: {out:?}",
            case.name,
            case.marker
        );
        assert!(
            !out.contains("__snippet__"),
            "{}: placeholder leaked into output: {out:?}",
            case.name
        );
    }
}

#[test]
fn invalid_source_is_rejected() {
    let err = remove_comments("fn main() { fn main() {").unwrap_err();
    assert!(matches!(err, StripError::Parse(_)));
    assert!(err.to_string().contains("error parsing source code"));
}

#[test]
fn output_is_canonically_formatted() {
    let input = "fn  main( ){let x=1;// c\nprintln!(\"{x}\");}";
    let out = remove_comments(input).unwrap();
    assert_eq!(
        out,
        "fn main() {\n    let x = 1;\n    println!(\"{x}\");\n}\n"
    );
}
