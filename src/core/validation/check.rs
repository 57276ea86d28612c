use crate::core::definition::Definition;
use crate::core::diagnostics::{Diagnostics, Stage, Tracer};
use crate::core::error::BrokenDefinition;
use crate::core::registry::Registry;

/// Checks that every definition's declared dependencies are provided by the registry.
///
/// Nothing is instantiated. Stops at the first definition with an unmet
/// dependency, in declaration order.
pub fn check_all<R>(registry: &R, diagnostics: &dyn Diagnostics) -> Result<(), BrokenDefinition>
where
    R: Registry + ?Sized,
{
    let tracer = Tracer::start(diagnostics, Stage::Check);
    tracer.trace(None, "(CHECK)");
    for definition in registry.definitions() {
        check_with(definition, registry, &tracer)?;
    }
    Ok(())
}

/// Checks a single definition against `registry`.
///
/// Useful for callers that want to keep going after a broken definition.
pub fn check_definition<R>(
    definition: &Definition,
    registry: &R,
    diagnostics: &dyn Diagnostics,
) -> Result<(), BrokenDefinition>
where
    R: Registry + ?Sized,
{
    check_with(definition, registry, &Tracer::start(diagnostics, Stage::Check))
}

fn check_with<R>(
    definition: &Definition,
    registry: &R,
    tracer: &Tracer<'_>,
) -> Result<(), BrokenDefinition>
where
    R: Registry + ?Sized,
{
    let label = definition.to_string();
    tracer.trace(Some(label.clone()), format!("Checking definition: {label} ..."));

    if !definition.has_constructor() {
        tracer.trace(Some(label), "- no constructor");
        return Ok(());
    }

    let params = definition.constructor_parameter_types();
    if params.is_empty() {
        tracer.trace(Some(label), "- no needed dependency");
        return Ok(());
    }

    tracer.trace(
        Some(label.clone()),
        format!("- checking {} ...", params.len()),
    );
    for &dependency in params {
        tracer.trace(
            Some(label.clone()),
            format!("- checking dependency type '{dependency}' ..."),
        );
        // Several providers still count as satisfied; resolution takes the first.
        if registry.find_by_type(dependency).is_empty() {
            tracer.error(
                Some(label.clone()),
                format!("(!) definition {label} is broken (!)"),
            );
            return Err(BrokenDefinition {
                definition: label,
                path: definition.path().clone(),
                missing: dependency,
            });
        }
        tracer.trace(Some(label.clone()), "- definition is ok!");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::diagnostics::{MemoryDiagnostics, NoopDiagnostics};
    use crate::core::registry::BeanRegistry;
    use crate::core::type_key::TypeKey;

    struct RepoX;
    struct RepoY;
    struct ServiceB;
    struct ServiceC;

    fn registry(definitions: Vec<Definition>) -> BeanRegistry {
        let mut registry = BeanRegistry::new();
        for d in definitions {
            registry.declare(d).unwrap();
        }
        registry
    }

    #[test]
    fn test_stops_at_first_unmet_parameter() {
        let registry = registry(vec![
            Definition::new("B", |_| Ok(ServiceB))
                .requires::<RepoX>()
                .requires::<RepoY>(),
        ]);
        let sink = MemoryDiagnostics::new();
        let err = check_all(&registry, &sink).unwrap_err();
        assert_eq!(err.missing, TypeKey::of::<RepoX>());

        let checked: Vec<_> = sink
            .messages()
            .into_iter()
            .filter(|m| m.starts_with("- checking dependency type"))
            .collect();
        assert_eq!(checked.len(), 1);
    }

    #[test]
    fn test_first_broken_definition_in_order_is_reported() {
        let registry = registry(vec![
            Definition::new("ok", |_| Ok(RepoY)),
            Definition::new("C", |_| Ok(ServiceC)).requires::<RepoX>(),
            Definition::new("B", |_| Ok(ServiceB)).requires::<RepoX>(),
        ]);
        let err = check_all(&registry, &NoopDiagnostics).unwrap_err();
        assert_eq!(err.path.as_str(), "C");
    }

    #[test]
    fn test_value_and_parameterless_definitions_always_pass() {
        let empty = BeanRegistry::new();
        let value = Definition::value("v", 1u8);
        let bare = Definition::new("bare", |_| Ok(RepoX));
        let sink = MemoryDiagnostics::new();

        check_definition(&value, &empty, &sink).unwrap();
        check_definition(&bare, &empty, &sink).unwrap();
        assert_eq!(
            sink.messages(),
            vec![
                format!("Checking definition: {value} ..."),
                "- no constructor".to_string(),
                format!("Checking definition: {bare} ..."),
                "- no needed dependency".to_string(),
            ]
        );
    }

    #[test]
    fn test_ok_is_traced_after_each_dependency() {
        let registry = registry(vec![
            Definition::new("x", |_| Ok(RepoX)),
            Definition::new("y", |_| Ok(RepoY)),
            Definition::new("B", |_| Ok(ServiceB))
                .requires::<RepoX>()
                .requires::<RepoY>(),
        ]);
        let sink = MemoryDiagnostics::new();
        check_definition(&registry.definitions()[2], &registry, &sink).unwrap();

        let steps: Vec<_> = sink.messages().into_iter().skip(1).collect();
        assert_eq!(steps[0], "- checking 2 ...");
        assert!(steps[1].starts_with("- checking dependency type"));
        assert_eq!(steps[2], "- definition is ok!");
        assert!(steps[3].starts_with("- checking dependency type"));
        assert_eq!(steps[4], "- definition is ok!");
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_failure_is_traced_as_error() {
        let registry = registry(vec![Definition::new("B", |_| Ok(ServiceB)).requires::<RepoX>()]);
        let sink = MemoryDiagnostics::new();
        check_all(&registry, &sink).unwrap_err();
        let errors = sink.errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("is broken"));
    }
}
