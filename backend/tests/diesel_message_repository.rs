//! Integration tests for `DieselMessageRepository` against embedded PostgreSQL.
//!
//! `messages` carries no foreign keys, so participants are bare ids here.

mod support;

use carelink::domain::ports::MessageRepository;
use carelink::domain::{Message, MessageContent, NewMessage, UserId};
use carelink::outbound::persistence::{DieselMessageRepository, run_pending_migrations};
use chrono::{DateTime, Utc};
use rstest::{fixture, rstest};

use support::embedded_postgres::{PgDatabase, handle_cluster_setup_failure, provision_database};

const TEST_DB: &str = "carelink_message_repo_test";

struct RepoContext {
    repository: DieselMessageRepository,
    db: PgDatabase,
}

impl RepoContext {
    fn send(&self, from: UserId, to: UserId, content: &str, secs: i64) -> Message {
        let message = NewMessage {
            sender_id: from,
            receiver_id: to,
            content: MessageContent::new(content).expect("fixture content"),
            sent_at: at(secs),
        };
        self.db
            .runtime
            .block_on(self.repository.insert(&message))
            .expect("insert message")
    }

    fn thread(&self, a: UserId, b: UserId) -> Vec<Message> {
        self.db
            .runtime
            .block_on(self.repository.list_between(&a, &b))
            .expect("list thread")
    }
}

fn at(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).expect("fixture timestamp")
}

fn contents(messages: &[Message]) -> Vec<&str> {
    messages
        .iter()
        .map(|message| message.content.as_ref())
        .collect()
}

#[fixture]
fn repo_context() -> Option<RepoContext> {
    match provision_database(TEST_DB) {
        Ok(db) => Some(RepoContext {
            repository: DieselMessageRepository::new(db.pool.clone()),
            db,
        }),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn insert_returns_the_stored_row(repo_context: Option<RepoContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_returns_the_stored_row skipped");
        return;
    };
    let (pat, doc) = (UserId::random(), UserId::random());

    let stored = context.send(pat, doc, "  hello doctor  ", 1_700_000_000);
    assert_eq!(stored.sender_id, pat);
    assert_eq!(stored.receiver_id, doc);
    assert_eq!(stored.content.as_ref(), "  hello doctor  ");
    assert_eq!(stored.sent_at, at(1_700_000_000));
    assert_eq!(context.thread(pat, doc), vec![stored]);
}

#[rstest]
fn thread_is_direction_agnostic_and_oldest_first(repo_context: Option<RepoContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: thread_is_direction_agnostic_and_oldest_first skipped");
        return;
    };
    let (pat, doc, other) = (UserId::random(), UserId::random(), UserId::random());
    context.send(pat, doc, "third", 1_700_000_300);
    context.send(doc, pat, "first", 1_700_000_100);
    context.send(pat, other, "elsewhere", 1_700_000_150);
    context.send(pat, doc, "second", 1_700_000_200);

    let forward = context.thread(pat, doc);
    assert_eq!(contents(&forward), vec!["first", "second", "third"]);
    assert_eq!(forward, context.thread(doc, pat));
    assert!(
        forward
            .windows(2)
            .all(|pair| matches!(pair, [a, b] if a.sent_at <= b.sent_at))
    );
}

#[rstest]
fn duplicate_sends_are_kept(repo_context: Option<RepoContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: duplicate_sends_are_kept skipped");
        return;
    };
    let (pat, doc) = (UserId::random(), UserId::random());
    let first = context.send(pat, doc, "ping", 1_700_000_000);
    let second = context.send(pat, doc, "ping", 1_700_000_000);

    let thread = context.thread(pat, doc);
    assert_eq!(contents(&thread), vec!["ping", "ping"]);
    assert_ne!(first.id, second.id);
}

#[rstest]
fn empty_pair_has_no_thread(repo_context: Option<RepoContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: empty_pair_has_no_thread skipped");
        return;
    };
    assert!(context.thread(UserId::random(), UserId::random()).is_empty());
}

#[rstest]
fn inbox_senders_are_distinct_and_ordered_by_id(repo_context: Option<RepoContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: inbox_senders_are_distinct_and_ordered_by_id skipped");
        return;
    };
    let (doc, pat_a, pat_b, other_doc) = (
        UserId::random(),
        UserId::random(),
        UserId::random(),
        UserId::random(),
    );
    context.send(pat_a, doc, "hi", 1_700_000_000);
    context.send(pat_b, doc, "hello", 1_700_000_010);
    context.send(pat_a, doc, "again", 1_700_000_020);
    context.send(doc, pat_a, "reply", 1_700_000_030);
    context.send(pat_b, other_doc, "wrong doctor", 1_700_000_040);

    let senders = context
        .db
        .runtime
        .block_on(context.repository.distinct_senders_to(&doc))
        .expect("inbox senders");
    let mut expected = vec![pat_a, pat_b];
    expected.sort();
    assert_eq!(senders, expected);
}

#[rstest]
fn migrations_are_idempotent(repo_context: Option<RepoContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_are_idempotent skipped");
        return;
    };
    context
        .db
        .runtime
        .block_on(run_pending_migrations(&context.db.url))
        .expect("re-running migrations is a no-op");
}
