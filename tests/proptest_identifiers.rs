//! Property-based tests for the identifier codec and compound scalars.
//!
//! Parsers must never panic on arbitrary input, and every successfully
//! parsed identifier must format back to the exact input string.

use proptest::prelude::*;
use spdx_interchange::ident::{DocElementId, ElementId};
use spdx_interchange::model::{Actor, ActorOrNoAssertion};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    #[test]
    fn element_id_parse_doesnt_panic(s in "\\PC{0,200}") {
        let _ = ElementId::parse(&s);
    }

    #[test]
    fn doc_element_id_parse_doesnt_panic(s in "\\PC{0,200}") {
        let _ = DocElementId::parse(&s);
    }

    #[test]
    fn element_id_roundtrips(id in "[A-Za-z0-9.-]{1,40}") {
        let input = format!("SPDXRef-{id}");
        let parsed = ElementId::parse(&input).expect("well-formed element id");
        prop_assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn cross_document_id_roundtrips(
        doc in "[A-Za-z0-9.-]{1,40}",
        id in "[A-Za-z0-9.-]{1,40}",
    ) {
        let input = format!("DocumentRef-{doc}:SPDXRef-{id}");
        let parsed = DocElementId::parse(&input).expect("well-formed cross-doc id");
        prop_assert_eq!(parsed.to_string(), input);
    }

    #[test]
    fn parsed_doc_element_ids_always_roundtrip(s in "\\PC{0,200}") {
        // Whatever parses must format back bit-exactly.
        if let Ok(parsed) = DocElementId::parse(&s) {
            prop_assert_eq!(parsed.to_string(), s);
        }
    }

    #[test]
    fn extra_colons_always_rejected(
        doc in "[A-Za-z0-9.-]{1,20}",
        id in "[A-Za-z0-9.-]{1,20}",
        extra in "[A-Za-z0-9.-]{1,20}",
    ) {
        let input = format!("DocumentRef-{doc}:SPDXRef-{id}:{extra}");
        prop_assert!(DocElementId::parse(&input).is_err());
    }

    #[test]
    fn actor_parse_doesnt_panic(s in "\\PC{0,200}") {
        let _ = Actor::parse(&s, "creator");
        let _ = ActorOrNoAssertion::parse(&s, "supplier");
    }

    #[test]
    fn actor_roundtrips(name in "[A-Za-z][A-Za-z0-9 ]{0,40}") {
        for kind in ["Person", "Organization", "Tool"] {
            let input = format!("{kind}: {}", name.trim());
            let parsed = Actor::parse(&input, "creator").expect("well-formed actor");
            prop_assert_eq!(parsed.to_string(), input);
        }
    }
}
