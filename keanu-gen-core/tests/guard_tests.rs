//! Guard-expression synthesis and its diagnostics.
//!
//! Each `#[case]` builds its own descriptor.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use keanu_gen_core::{Architecture, OperatingSystem, TypeDescriptor};
use rstest::rstest;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct WarnCounter(Arc<AtomicUsize>);

impl<S: Subscriber> Layer<S> for WarnCounter {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if *event.metadata().level() == Level::WARN {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Run `f` with a subscriber that counts `WARN` events; returns its value and
/// the count.
fn count_warnings<T>(f: impl FnOnce() -> T) -> (T, usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&count)));
    let value = tracing::subscriber::with_default(subscriber, f);
    (value, count.load(Ordering::SeqCst))
}

// ---------------------------------------------------------------------------
// Synthesis
// ---------------------------------------------------------------------------

#[rstest]
#[case::unconditional(TypeDescriptor::new("Int"), "true")]
#[case::single_arch(
    TypeDescriptor::new("T").conditional_on(&[Architecture::Arm64]),
    "arch(arm64)"
)]
#[case::arm_group(
    TypeDescriptor::new("T").conditional_on(Architecture::ARM),
    "arch(arm) || arch(arm64)"
)]
#[case::apple_group(
    TypeDescriptor::new("T").conditional_on(OperatingSystem::APPLE),
    "os(macOS) || os(iOS) || os(tvOS) || os(watchOS)"
)]
#[case::os_then_arch(
    TypeDescriptor::new("T")
        .conditional_on(&[OperatingSystem::Mac, OperatingSystem::Linux])
        .conditional_on(&[Architecture::Arm64]),
    "os(macOS) || os(Linux) && arch(arm64)"
)]
#[case::empty_axis_is_skipped(
    TypeDescriptor::new("T")
        .conditional_on::<OperatingSystem>(&[])
        .conditional_on(&[Architecture::X86_64]),
    "arch(x86_64)"
)]
fn guard_expression_matches(#[case] ty: TypeDescriptor, #[case] expected: &str) {
    assert_eq!(ty.guard_expression(), expected);
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn unconditional_type_does_not_warn() {
    let ty = TypeDescriptor::new("Double");
    let (guard, warnings) = count_warnings(|| ty.guard_expression());
    assert_eq!(guard, "true");
    assert!(!ty.is_conditional());
    assert_eq!(warnings, 0);
}

#[test]
fn conditional_type_without_predicate_warns_once() {
    let ty = TypeDescriptor::new("Broken")
        .conditional_on::<OperatingSystem>(&[])
        .conditional_on::<Architecture>(&[]);
    let (guard, warnings) = count_warnings(|| ty.guard_expression());
    assert_eq!(guard, "true");
    assert_eq!(warnings, 1);
}

#[test]
fn conditional_type_with_predicate_does_not_warn() {
    let ty = TypeDescriptor::new("Float80").conditional_on(Architecture::X86);
    let (guard, warnings) = count_warnings(|| ty.guard_expression());
    assert_eq!(guard, "arch(i386) || arch(x86_64)");
    assert_eq!(warnings, 0);
}
