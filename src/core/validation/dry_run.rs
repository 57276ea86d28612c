use crate::core::diagnostics::{Diagnostics, Stage, Tracer};
use crate::core::error::ResolutionError;
use crate::core::parameters::ParameterSource;
use crate::core::registry::Registry;
use crate::core::resolver::{Candidates, Resolver};

/// Builds every definition through the resolver, one by one, in declaration order.
///
/// Each resolution is pinned to the definition under test, so definitions
/// sharing a type are all exercised. Built instances are dropped right away.
/// The first failure is returned exactly as the resolver raised it.
pub fn dry_run<R, S>(
    registry: &R,
    resolver: &S,
    parameters: ParameterSource<'_>,
    diagnostics: &dyn Diagnostics,
) -> Result<(), ResolutionError>
where
    R: Registry + ?Sized,
    S: Resolver + ?Sized,
{
    let tracer = Tracer::start(diagnostics, Stage::DryRun);
    tracer.trace(None, "(DRY RUN)");
    for definition in registry.definitions() {
        let label = definition.to_string();
        tracer.trace(Some(label.clone()), format!("Testing instance {label} ..."));
        if let Err(err) = resolver.resolve(
            definition.path(),
            definition.target(),
            parameters,
            Candidates::Exactly(definition),
        ) {
            tracer.error(Some(label.clone()), format!("(!) {label} failed: {err}"));
            return Err(err);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::container::Container;
    use crate::core::definition::Definition;
    use crate::core::diagnostics::{MemoryDiagnostics, NoopDiagnostics};
    use crate::core::parameters::Parameters;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counted;

    #[test]
    fn test_each_definition_sharing_a_type_is_built() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let (f, s) = (first.clone(), second.clone());

        let container = Container::builder()
            .definition(Definition::new("one", move |_| {
                f.fetch_add(1, Ordering::SeqCst);
                Ok(Counted)
            }))
            .unwrap()
            .definition(Definition::new("two", move |_| {
                s.fetch_add(1, Ordering::SeqCst);
                Ok(Counted)
            }))
            .unwrap()
            .build();

        dry_run(&container, &container, &Parameters::empty, &NoopDiagnostics).unwrap();
        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parameter_source_is_used() {
        struct Named(String);

        let container = Container::builder()
            .definition(Definition::new("named", |ctx| Ok(Named(ctx.param(0)?))))
            .unwrap()
            .build();

        let err = dry_run(&container, &container, &Parameters::empty, &NoopDiagnostics)
            .unwrap_err();
        assert!(matches!(err, ResolutionError::MissingParameter { .. }));

        dry_run(
            &container,
            &container,
            &|| crate::parameters!["svc"],
            &NoopDiagnostics,
        )
        .unwrap();
    }

    #[test]
    fn test_failure_trace_names_definition() {
        struct Missing;
        struct Needy;

        let container = Container::builder()
            .definition(Definition::new("needy", |ctx| {
                ctx.get::<Missing>()?;
                Ok(Needy)
            }))
            .unwrap()
            .build();

        let sink = MemoryDiagnostics::new();
        let err = dry_run(&container, &container, &Parameters::empty, &sink).unwrap_err();
        assert!(matches!(err, ResolutionError::NoDefinitionFound { .. }));

        let messages = sink.messages();
        assert_eq!(messages[0], "(DRY RUN)");
        assert!(messages[1].starts_with("Testing instance Definition[path='needy'"));
        assert_eq!(sink.errors().len(), 1);
        assert!(sink.errors()[0].definition.as_deref().unwrap().contains("needy"));
    }
}
