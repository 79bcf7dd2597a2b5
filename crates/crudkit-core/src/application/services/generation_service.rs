//! Generation Service - main application orchestrator.
//!
//! This service turns a [`GenerationRequest`] into files:
//! 1. Parse fields and relations
//! 2. Derive validation rules
//! 3. Render every artifact from its stub
//! 4. Ask the scaffold backend where each artifact lives and write it
//!
//! Steps 1-3 form [`GenerationService::plan`] and never touch the project.
//! Step 4 is [`GenerationService::generate`]. Files placed before a failure
//! in step 4 are kept; the error names the artifact that failed.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, TemplateService,
        ports::{Filesystem, ScaffoldBackend},
    },
    domain::{
        Artifact, ArtifactKind, EntityName, FieldList, GenerationRequest, GenerationState,
        RelationList, RenderContext, StageTracker, UnknownKindPolicy, ValidationRuleSet,
        WrittenArtifact, derive_rules,
    },
    error::{CrudkitError, CrudkitResult},
};

/// Everything needed to write a CRUD slice, computed without side effects.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    pub run_id: Uuid,
    pub entity: EntityName,
    pub fields: FieldList,
    pub relations: RelationList,
    pub creation_rules: ValidationRuleSet,
    pub update_rules: ValidationRuleSet,
    /// In write order: model, migration, pivots, controller, requests.
    pub artifacts: Vec<Artifact>,
    pub states: Vec<GenerationState>,
}

impl GenerationPlan {
    pub fn artifact(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.artifact_kind == kind)
    }

    pub fn artifacts_of(&self, kind: ArtifactKind) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter().filter(move |a| a.artifact_kind == kind)
    }
}

/// Outcome of a successful [`GenerationService::generate`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationReport {
    pub plan: GenerationPlan,
    pub written: Vec<WrittenArtifact>,
}

impl GenerationReport {
    pub fn paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.written.iter().map(|w| &w.path)
    }
}

/// Main generation service.
pub struct GenerationService {
    templates: TemplateService,
    backend: Box<dyn ScaffoldBackend>,
    filesystem: Box<dyn Filesystem>,
    unknown_kinds: UnknownKindPolicy,
}

impl GenerationService {
    /// Create a new generation service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use crudkit_core::application::{GenerationService, TemplateService};
    ///
    /// let service = GenerationService::new(
    ///     TemplateService::new(store), // impl TemplateStore
    ///     backend,                     // impl ScaffoldBackend
    ///     filesystem,                  // impl Filesystem
    /// );
    /// ```
    pub fn new(
        templates: TemplateService,
        backend: Box<dyn ScaffoldBackend>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            templates,
            backend,
            filesystem,
            unknown_kinds: UnknownKindPolicy::default(),
        }
    }

    /// How relation tokens with an unrecognised kind are handled.
    pub fn with_unknown_kind_policy(mut self, policy: UnknownKindPolicy) -> Self {
        self.unknown_kinds = policy;
        self
    }

    pub fn templates(&self) -> &TemplateService {
        &self.templates
    }

    /// Parse, derive and render every artifact without touching the project.
    #[instrument(skip_all, fields(entity = %request.entity_name))]
    pub fn plan(&self, request: &GenerationRequest) -> CrudkitResult<GenerationPlan> {
        let run_id = Uuid::new_v4();
        let mut tracker = StageTracker::new();

        match self.run_stages(request, run_id, &mut tracker) {
            Ok(plan) => {
                info!(
                    %run_id,
                    artifacts = plan.artifacts.len(),
                    "Generation plan ready"
                );
                Ok(plan)
            }
            Err(e) => {
                let at = tracker.current();
                tracker.fail();
                warn!(%run_id, stage = %at, error = %e, "Generation plan failed");
                Err(e)
            }
        }
    }

    /// Plan, then place and write every artifact.
    #[instrument(skip_all, fields(entity = %request.entity_name))]
    pub fn generate(&self, request: &GenerationRequest) -> CrudkitResult<GenerationReport> {
        let plan = self.plan(request)?;
        let mut written: Vec<WrittenArtifact> = Vec::with_capacity(plan.artifacts.len());

        for artifact in &plan.artifacts {
            match self.commit(artifact) {
                Ok(path) => {
                    debug!(
                        artifact = %artifact.artifact_kind,
                        path = %path.display(),
                        "Artifact written"
                    );
                    written.push(WrittenArtifact {
                        artifact_kind: artifact.artifact_kind,
                        target_name: artifact.target_name.clone(),
                        path,
                    });
                }
                Err(e) => {
                    let committed: Vec<_> = written
                        .iter()
                        .map(|w| w.path.display().to_string())
                        .collect();
                    error!(
                        run_id = %plan.run_id,
                        artifact = %artifact.artifact_kind,
                        target = %artifact.target_name,
                        ?committed,
                        "Write failed; files already written were kept"
                    );
                    return Err(e);
                }
            }
        }

        info!(
            run_id = %plan.run_id,
            files = written.len(),
            "CRUD for {} created", plan.entity
        );
        Ok(GenerationReport { plan, written })
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run_stages(
        &self,
        request: &GenerationRequest,
        run_id: Uuid,
        tracker: &mut StageTracker,
    ) -> CrudkitResult<GenerationPlan> {
        tracker.advance(GenerationState::ParsingFields)?;
        let entity = EntityName::parse(&request.entity_name)?;
        let fields = FieldList::parse(&request.field_spec)?;
        debug!(count = fields.len(), "Parsed fields");

        tracker.advance(GenerationState::ParsingRelations)?;
        let relations = RelationList::parse(request.relation_spec.as_deref(), self.unknown_kinds)?;
        debug!(
            count = relations.len(),
            skipped = relations.skipped().len(),
            "Parsed relations"
        );

        tracker.advance(GenerationState::DerivingRules)?;
        let (creation_rules, update_rules) = derive_rules(&fields);

        tracker.advance(GenerationState::RenderingArtifacts)?;
        let artifacts =
            self.render_artifacts(&entity, &fields, &relations, &creation_rules, &update_rules)?;

        tracker.advance(GenerationState::Done)?;

        Ok(GenerationPlan {
            run_id,
            entity,
            fields,
            relations,
            creation_rules,
            update_rules,
            artifacts,
            states: tracker.trail().to_vec(),
        })
    }

    fn render_artifacts(
        &self,
        entity: &EntityName,
        fields: &FieldList,
        relations: &RelationList,
        creation_rules: &ValidationRuleSet,
        update_rules: &ValidationRuleSet,
    ) -> CrudkitResult<Vec<Artifact>> {
        let mut artifacts = Vec::new();
        let table = entity.table_name();

        let model = RenderContext::new(ArtifactKind::Model)
            .with_variable("modelName", entity.as_str())
            .with_variable("tableName", table.as_str())
            .with_variable("fillable", fields.fillable_text())
            .with_variable("relations", relations.methods_text()?);
        artifacts.push(self.render(&model, entity.as_str())?);

        let migration = RenderContext::new(ArtifactKind::Migration)
            .with_variable("tableName", table.as_str())
            .with_variable("fields", fields.migration_columns_text());
        artifacts.push(self.render(&migration, entity.migration_name())?);

        let mut pivots: Vec<String> = Vec::new();
        for relation in relations.many_to_many() {
            let Some(pivot) = relation.pivot_table_name(entity.as_str())? else {
                continue;
            };
            if pivots.contains(&pivot) {
                debug!(pivot = %pivot, related = %relation.related_entity, "Pivot already planned");
                continue;
            }
            let context = RenderContext::new(ArtifactKind::PivotMigration)
                .with_variable("pivotTableName", pivot.as_str())
                .with_variable("foreignKey", relation.foreign_key.as_str())
                .with_variable("relatedKey", relation.local_or_related_key.as_str());
            artifacts.push(self.render(&context, format!("create_{pivot}_table"))?);
            pivots.push(pivot);
        }

        let controller_name = entity.controller_name();
        let controller = RenderContext::new(ArtifactKind::Controller)
            .with_variable("controllerName", controller_name.as_str())
            .with_variable("modelName", entity.as_str())
            .with_variable("modelVariable", entity.variable_name())
            .with_variable("storeRequestName", entity.store_request_name())
            .with_variable("updateRequestName", entity.update_request_name());
        artifacts.push(self.render(&controller, controller_name)?);

        for (kind, name, rules) in [
            (
                ArtifactKind::StoreRequest,
                entity.store_request_name(),
                creation_rules,
            ),
            (
                ArtifactKind::UpdateRequest,
                entity.update_request_name(),
                update_rules,
            ),
        ] {
            let context = RenderContext::new(kind)
                .with_variable("formRequestName", name.as_str())
                .with_variable("rules", rules.to_text());
            artifacts.push(self.render(&context, name)?);
        }

        Ok(artifacts)
    }

    fn render(
        &self,
        context: &RenderContext,
        target_name: impl Into<String>,
    ) -> CrudkitResult<Artifact> {
        let text = self.templates.render(context)?;
        Ok(Artifact::new(context.kind(), target_name, text))
    }

    /// Place one artifact through the backend and write its text.
    fn commit(&self, artifact: &Artifact) -> CrudkitResult<PathBuf> {
        let path = self
            .backend
            .create_bare_artifact(artifact.artifact_kind.bare_kind(), &artifact.target_name)
            .map_err(|e| backend_error(artifact, e))?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&path, &artifact.rendered_text)?;
        Ok(path)
    }
}

/// Name the artifact a backend failure happened on.
fn backend_error(artifact: &Artifact, e: CrudkitError) -> CrudkitError {
    ApplicationError::ScaffoldBackend {
        artifact: artifact.artifact_kind,
        target: artifact.target_name.clone(),
        reason: e.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use mockall::mock;

    use super::*;
    use crate::application::ports::TemplateStore;
    use crate::domain::{BareArtifactKind, DomainError};

    mock! {
        Store {}
        impl TemplateStore for Store {
            fn get_template(&self, name: &str) -> CrudkitResult<String>;
            fn list(&self) -> CrudkitResult<Vec<String>>;
        }
    }

    mock! {
        Backend {}
        impl ScaffoldBackend for Backend {
            fn create_bare_artifact(&self, kind: BareArtifactKind, name: &str) -> CrudkitResult<PathBuf>;
            fn locate_latest_migration_file(
                &self,
                dir: &Path,
                fragment: &str,
            ) -> CrudkitResult<Option<String>>;
        }
    }

    mock! {
        Fs {}
        impl Filesystem for Fs {
            fn create_dir_all(&self, path: &Path) -> CrudkitResult<()>;
            fn write_file(&self, path: &Path, content: &str) -> CrudkitResult<()>;
            fn read_file(&self, path: &Path) -> CrudkitResult<String>;
            fn exists(&self, path: &Path) -> bool;
            fn list_dir(&self, path: &Path) -> CrudkitResult<Vec<String>>;
        }
    }

    /// Every stub is just its placeholders, one per line.
    fn service() -> GenerationService {
        let mut store = MockStore::new();
        store.expect_get_template().returning(|name| {
            let kind = ArtifactKind::from_template_name(name).ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
            })?;
            Ok(kind
                .placeholders()
                .iter()
                .map(|p| format!("{{{{{p}}}}}\n"))
                .collect())
        });
        GenerationService::new(
            TemplateService::new(Box::new(store)),
            Box::new(MockBackend::new()),
            Box::new(MockFs::new()),
        )
    }

    #[test]
    fn invalid_entity_name_fails_inside_a_working_stage() {
        let service = service();
        let mut tracker = StageTracker::new();

        let err = service
            .run_stages(
                &GenerationRequest::new("9Lives", "title:string"),
                Uuid::nil(),
                &mut tracker,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            CrudkitError::Domain(DomainError::InvalidName { .. })
        ));
        assert_eq!(tracker.current(), GenerationState::ParsingFields);
        tracker.fail();
        assert_eq!(
            tracker.trail(),
            [
                GenerationState::Idle,
                GenerationState::ParsingFields,
                GenerationState::Failed
            ]
        );
    }

    #[test]
    fn repeated_many_to_many_target_gets_one_pivot() {
        let request = GenerationRequest::new("Post", "title:string")
            .with_relations("belongsToMany:Tag:tag_id:post_id,belongsToMany:Tags:label_id:post_id");

        let plan = service().plan(&request).unwrap();

        let pivots: Vec<_> = plan
            .artifacts_of(ArtifactKind::PivotMigration)
            .map(|a| a.target_name.as_str())
            .collect();
        assert_eq!(pivots, ["create_post_tag_table"]);
        assert_eq!(plan.relations.len(), 2);
    }
}
