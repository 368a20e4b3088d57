use futures_util::stream;
use proptest::prelude::*;
use streamchat_core::{ChatError, FragmentStream, StreamFragment, render_stream};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("tokio runtime")
}

fn fragment_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        "[a-zA-Z0-9 .,!?]{1,12}".prop_map(Some),
    ]
}

proptest! {
    #[test]
    fn prop_reply_and_output_equal_concatenation_of_non_empty_fragments(
        fragments in prop::collection::vec(fragment_strategy(), 0..32),
    ) {
        let expected: String = fragments.iter().flatten().map(String::as_str).collect();
        let items: Vec<Result<StreamFragment, ChatError>> = fragments
            .into_iter()
            .map(|f| Ok(StreamFragment::new(f)))
            .collect();
        let stream: FragmentStream = Box::pin(stream::iter(items));
        let mut out = Vec::new();

        let reply = runtime()
            .block_on(render_stream(stream, &mut out))
            .expect("stream without errors should succeed");

        prop_assert_eq!(&reply, &expected);
        prop_assert_eq!(String::from_utf8(out).expect("utf8 output"), expected);
    }

    #[test]
    fn prop_failure_after_k_fragments_renders_only_the_prefix(
        fragments in prop::collection::vec("[a-z]{1,6}", 1..16),
        cut in 0usize..16,
    ) {
        let k = cut % fragments.len();
        let prefix: String = fragments[..k].concat();
        let mut items: Vec<Result<StreamFragment, ChatError>> = fragments[..k]
            .iter()
            .map(|f| Ok(StreamFragment::from(f.as_str())))
            .collect();
        items.push(Err(ChatError::StreamError("cut".to_string())));
        items.extend(fragments[k..].iter().map(|f| Ok(StreamFragment::from(f.as_str()))));
        let stream: FragmentStream = Box::pin(stream::iter(items));
        let mut out = Vec::new();

        let result = runtime().block_on(render_stream(stream, &mut out));

        prop_assert!(result.is_err());
        prop_assert_eq!(String::from_utf8(out).expect("utf8 output"), prefix);
    }
}
