//! End-to-end console scenarios.

use std::time::Duration;

use tabula_client::{MemoryChain, NameResolver, NamespaceResolver, ResolveError};
use tabula_core::TableName;
use tabula_session::{ScriptedConsole, Session, SessionConfig};
use tabula_tests::prelude::*;

mod reads {
    use super::*;

    #[tokio::test]
    async fn healthbot_counter() {
        Scenario::new("healthbot_counter")
            .input("select * from healthbot_31337_1;")
            .expect(|a| {
                a.output([r#"[{"counter":1}]"#])
                    .no_errors()
                    .dispatched(1)
                    .closed(CloseReason::EndOfInput)
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn pretty_output() {
        Scenario::new("pretty_output")
            .format(OutputFormat::Pretty)
            .input("select counter from healthbot_31337_1;")
            .expect(|a| a.output(["counter", "-------", "1", "", "(1 row)"]))
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn raw_output() {
        Scenario::new("raw_output")
            .format(OutputFormat::Raw)
            .input("select * from healthbot_31337_1;")
            .expect(|a| a.output([r#"{"columns":[{"name":"counter"}],"rows":[[1]]}"#]))
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn multi_line_statement() {
        Scenario::new("multi_line_statement")
            .inputs(["select *", "", "from healthbot_31337_1", ";"])
            .expect(|a| a.dispatched(1).contains(r#""counter":1"#))
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn nothing_sent_without_terminator() {
        // Input closes mid-statement: the partial buffer is sent once at end of input,
        // never earlier.
        let transcript = Scenario::new("no_terminator")
            .inputs(["select *", "from", "healthbot_31337_1"])
            .expect(|a| a.dispatched(1).closed(CloseReason::EndOfInput))
            .run()
            .await
            .unwrap();
        assert_eq!(transcript.output.len(), 1);
    }
}

mod aliases {
    use super::*;

    #[tokio::test]
    async fn alias_matches_canonical_rows() {
        let canonical = Scenario::new("canonical")
            .input("select * from healthbot_31337_1;")
            .run()
            .await
            .unwrap();

        Scenario::new("alias")
            .alias("bar.eth", "foo", "healthbot_31337_1")
            .input("select * from [foo.bar.eth];")
            .expect(|a| {
                a.output(canonical.output.clone())
                    .history(["select * from [foo.bar.eth];"])
                    .no_errors()
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unresolved_alias_fails_downstream() {
        Scenario::new("unresolved_alias")
            .input("select * from [missing.eth];")
            .input("select * from healthbot_31337_1;")
            .expect(|a| {
                a.error("no such table: missing.eth")
                    .dispatched(1)
                    .closed(CloseReason::EndOfInput)
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn alias_in_write_block() {
        Scenario::new("alias_write")
            .alias("bar.eth", "foo", "healthbot_31337_1")
            .inputs([
                "insert into [foo.bar.eth] values (2); insert into foo values (3);",
                "confirm",
            ])
            .expect(|a| a.dispatched(1).table_rows("healthbot_31337_1", 3))
            .run()
            .await
            .unwrap();
    }
}

mod mutations {
    use super::*;

    #[tokio::test]
    async fn create_confirmed() {
        Scenario::new("create_confirmed")
            .format(OutputFormat::Pretty)
            .inputs(["CREATE TABLE t (id int);", "confirm"])
            .expect(|a| {
                a.contains("Committing to network. This will take a few moments.")
                    .matches(r"^Created table t_31337_\d+$")
                    .table("t_31337_2")
                    .dispatched(1)
                    .no_errors()
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_denied() {
        Scenario::new("create_denied")
            .inputs(["CREATE TABLE t (id int);", "deny"])
            .expect(|a| {
                a.output(["Aborting."])
                    .no_table("t_31337_2")
                    .dispatched(0)
                    .no_errors()
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn one_confirmation_covers_block() {
        Scenario::new("multi_segment_block")
            .input(
                "insert into healthbot_31337_1 values (2); \
                 delete from healthbot_31337_1 where counter = 1;",
            )
            .input("y")
            .expect(|a| a.dispatched(1).table_rows("healthbot_31337_1", 1).no_errors())
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unrecognized_answer_reasks() {
        Scenario::new("reask")
            .inputs(["delete from healthbot_31337_1;", "sure", "n"])
            .expect(|a| {
                a.output(["Aborting."])
                    .error("Please answer confirm")
                    .table_rows("healthbot_31337_1", 1)
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_then_read_same_session() {
        Scenario::new("create_then_read")
            .inputs([
                "create table pets (name text);",
                "confirm",
                "insert into pets_31337_2 values ('rex');",
                "confirm",
                "select * from pets_31337_2;",
            ])
            .expect(|a| {
                a.contains(r#"[{"name":"rex"}]"#)
                    .dispatched(3)
                    .released_once()
                    .no_errors()
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn seeded_tables() {
        Scenario::new("seeded")
            .seed("create table owners (name text);")
            .seed("insert into owners_31337_2 values ('ann'), ('bo');")
            .input("select name from owners_31337_2;")
            .expect(|a| a.output([r#"[{"name":"ann"},{"name":"bo"}]"#]))
            .run()
            .await
            .unwrap();
    }
}

mod lifecycle {
    use super::*;

    #[tokio::test]
    async fn exit_releases_connection_once() {
        let transcript = Scenario::new("exit")
            .inputs([".exit", "select * from healthbot_31337_1;"])
            .expect(|a| a.closed(CloseReason::Exit).dispatched(0).released_once())
            .run()
            .await
            .unwrap();
        assert!(transcript.output.is_empty());
    }

    #[tokio::test]
    async fn quit_is_exit() {
        Scenario::new("quit")
            .input(".quit")
            .expect(|a| a.closed(CloseReason::Exit).released_once())
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn parse_errors_keep_the_session() {
        Scenario::new("parse_errors")
            .inputs([
                "create table a (id int); select * from healthbot_31337_1;",
                "select * from healthbot_31337_1; insert into healthbot_31337_1 values (2);",
                ".frobnicate",
                "select * from healthbot_31337_1;",
            ])
            .expect(|a| {
                a.error("create statements must be sent on their own")
                    .error("read and write statements cannot be mixed in one block")
                    .error("unknown command '.frobnicate'")
                    .dispatched(1)
            })
            .run()
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn interactive_transcript() {
        let transcript = Scenario::new("interactive")
            .interactive()
            .inputs(["select *", "from healthbot_31337_1;", ".help", ".exit"])
            .expect(|a| a.contains("Welcome to Tabula").contains(".history").contains("Goodbye!"))
            .run()
            .await
            .unwrap();
        assert_eq!(
            transcript.prompts,
            ["tabula> ", "   ...> ", "tabula> ", "tabula> "]
        );
    }

    #[tokio::test]
    async fn initial_statement() {
        Scenario::new("initial")
            .initial("select * from healthbot_31337_1;")
            .expect(|a| a.dispatched(1).closed(CloseReason::EndOfInput))
            .run()
            .await
            .unwrap();
    }
}

/// Never answers.
struct Stalled;

impl NameResolver for Stalled {
    async fn resolve_alias(&self, _alias: &str) -> Result<Option<TableName>, ResolveError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn interrupt_during_resolution_sends_nothing() {
    let chain = MemoryChain::seeded(Chain::default());
    let mut console = ScriptedConsole::new(["insert into [foo.bar.eth] values (2);", "confirm"]);

    let summary = Session::new(SessionConfig::batch(), chain.clone(), Stalled, &mut console)
        .run(None, tokio::time::sleep(Duration::from_millis(50)))
        .await
        .unwrap();

    assert_eq!(summary.reason, CloseReason::Interrupted);
    assert_eq!(summary.dispatched, 0);
    assert_eq!(console.remaining(), 1);
    assert_eq!(console.errors(), ["Caught interrupt signal"]);
    assert_eq!(chain.snapshot("healthbot_31337_1").map(|r| r.row_count()), Some(1));
    assert_eq!(chain.close_count(), 1);
}

#[tokio::test]
async fn interrupt_discards_partial_buffer() {
    let chain = MemoryChain::seeded(Chain::default());
    let mut console =
        ScriptedConsole::new(["select *", "from healthbot_31337_1"]).stall_when_drained();

    let summary = Session::new(
        SessionConfig::batch(),
        chain.clone(),
        NamespaceResolver::new(),
        &mut console,
    )
    .run(None, tokio::time::sleep(Duration::from_millis(50)))
    .await
    .unwrap();

    assert_eq!(summary.reason, CloseReason::Interrupted);
    assert_eq!(summary.dispatched, 0);
    assert!(summary.history.is_empty());
    assert!(console.output().is_empty());
    assert_eq!(console.errors(), ["Caught interrupt signal"]);
    assert_eq!(chain.close_count(), 1);
}

#[tokio::test]
async fn interrupt_while_confirming_sends_nothing() {
    let chain = MemoryChain::seeded(Chain::default());
    let mut console =
        ScriptedConsole::new(["insert into healthbot_31337_1 values (2);"]).stall_when_drained();

    let summary = Session::new(
        SessionConfig::batch(),
        chain.clone(),
        NamespaceResolver::new(),
        &mut console,
    )
    .run(None, tokio::time::sleep(Duration::from_millis(50)))
    .await
    .unwrap();

    assert_eq!(summary.reason, CloseReason::Interrupted);
    assert_eq!(summary.dispatched, 0);
    assert!(console.output().is_empty());
    assert_eq!(console.errors(), ["Caught interrupt signal"]);
    assert_eq!(chain.snapshot("healthbot_31337_1").map(|r| r.row_count()), Some(1));
    assert_eq!(chain.close_count(), 1);
}
