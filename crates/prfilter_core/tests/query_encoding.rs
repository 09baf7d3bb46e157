use pretty_assertions::assert_eq;
use prfilter_core::{
    decode, decode_url, encode, with_filter, FilterState, LINKED_TOKEN, NOT_LINKED_TOKEN,
};

const QUERIES: &[&str] = &[
    "",
    "   ",
    "is:open",
    "is:open linked:pr",
    "is:open -linked:pr",
    "linked:pr is:issue   label:bug",
    "-linked:pr linked:pr",
    "linked:pr linked:pr -linked:pr",
    "  is:open\tlinked:pr\nauthor:octo  ",
    "xlinked:pr linked:prs",
];

fn count_word(text: &str, word: &str) -> usize {
    text.split_whitespace().filter(|w| *w == word).count()
}

#[test]
fn decode_reads_back_every_encoded_state() {
    for query in QUERIES {
        for state in FilterState::ALL {
            assert_eq!(decode(&encode(query, state)), state, "query {query:?}");
        }
    }
}

#[test]
fn encode_never_leaves_both_tokens() {
    for query in QUERIES {
        for state in FilterState::ALL {
            let encoded = encode(query, state);
            let linked = count_word(&encoded, LINKED_TOKEN);
            let not_linked = count_word(&encoded, NOT_LINKED_TOKEN);
            assert!(linked + not_linked <= 1, "{encoded:?}");
        }
    }
}

#[test]
fn encode_is_idempotent() {
    for query in QUERIES {
        for state in FilterState::ALL {
            let once = encode(query, state);
            assert_eq!(encode(&once, state), once);
        }
    }
}

#[test]
fn encode_keeps_unrelated_terms_in_order() {
    assert_eq!(
        encode("linked:pr is:open  label:bug -linked:pr author:me", FilterState::WithLink),
        "is:open label:bug author:me linked:pr"
    );
    assert_eq!(encode("is:open linked:pr", FilterState::None), "is:open");
    assert_eq!(encode("", FilterState::WithoutLink), "-linked:pr");
}

#[test]
fn switching_from_with_to_without() {
    assert_eq!(
        encode("is:open linked:pr", FilterState::WithoutLink),
        "is:open -linked:pr"
    );
}

#[test]
fn decode_handles_empty_and_garbage() {
    assert_eq!(decode(""), FilterState::None);
    assert_eq!(decode("linked:pr"), FilterState::WithLink);
    assert_eq!(decode("is:open -linked:pr"), FilterState::WithoutLink);
    assert_eq!(decode("%%%"), FilterState::None);
}

#[test]
fn decode_url_reads_the_q_parameter() {
    assert_eq!(
        decode_url("https://github.com/o/r/issues?q=is%3Aopen+linked%3Apr"),
        FilterState::WithLink
    );
    assert_eq!(
        decode_url("https://github.com/o/r/issues?q=is:open%20-linked:pr&page=2"),
        FilterState::WithoutLink
    );
    assert_eq!(decode_url("https://github.com/o/r/issues"), FilterState::None);
    assert_eq!(decode_url("not a url"), FilterState::None);
}

#[test]
fn with_filter_rewrites_q_and_keeps_other_params() {
    let url = with_filter(
        "https://github.com/o/r/issues?page=2&q=is%3Aopen&sort=created",
        FilterState::WithLink,
    )
    .unwrap();

    assert_eq!(
        url,
        "https://github.com/o/r/issues?page=2&q=is%3Aopen+linked%3Apr&sort=created"
    );
    assert_eq!(decode_url(&url), FilterState::WithLink);
}

#[test]
fn with_filter_adds_q_when_missing() {
    let url = with_filter("https://github.com/o/r/issues", FilterState::WithoutLink).unwrap();
    assert_eq!(url, "https://github.com/o/r/issues?q=-linked%3Apr");
}

#[test]
fn with_filter_none_clears_tokens() {
    let url = with_filter(
        "https://github.com/o/r/issues?q=linked%3Apr",
        FilterState::None,
    )
    .unwrap();
    assert_eq!(url, "https://github.com/o/r/issues?q=");
}

#[test]
fn with_filter_rejects_unparsable_url() {
    assert!(with_filter("/o/r/issues", FilterState::None).is_err());
}

#[test]
fn filter_state_uses_option_keys_in_json() {
    let json = serde_json::to_string(&FilterState::ALL).unwrap();
    assert_eq!(json, r#"["none","with-pr","without-pr"]"#);
    let parsed: FilterState = serde_json::from_str(r#""without-pr""#).unwrap();
    assert_eq!(parsed, FilterState::WithoutLink);
}
