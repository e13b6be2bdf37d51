// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pathwise-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pathwise and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

fn parse_id<T>(field: &'static str, value: String) -> Result<Id<T>, StoreError> {
    match Id::new(value.as_str()) {
        Ok(id) => Ok(id),
        Err(source) => Err(StoreError::InvalidId {
            field,
            value,
            source,
        }),
    }
}

fn parse_ids<T>(field: &'static str, values: Vec<String>) -> Result<Vec<Id<T>>, StoreError> {
    values
        .into_iter()
        .map(|value| parse_id(field, value))
        .collect()
}

fn ids_to_json<'a, T: 'a>(ids: impl IntoIterator<Item = &'a Id<T>>) -> Vec<String> {
    ids.into_iter().map(|id| id.as_str().to_owned()).collect()
}

fn duplicate(kind: EntityKind, id: impl ToString) -> StoreError {
    StoreError::Duplicate {
        kind,
        id: id.to_string(),
    }
}

fn store_from_json(snapshot: SnapshotJson) -> Result<EntityStore, StoreError> {
    let mut store = EntityStore::new();

    for department_json in snapshot.departments {
        let department_id: DepartmentId = parse_id("departments[].id", department_json.id)?;
        let core_module_ids =
            parse_ids("departments[].coreModuleIds[]", department_json.core_module_ids)?;
        if store.department(&department_id).is_some() {
            return Err(duplicate(EntityKind::Department, &department_id));
        }
        store.departments_mut().insert(
            department_id.clone(),
            Department::new(department_id, department_json.name)
                .with_core_module_ids(core_module_ids),
        );
    }

    for role_json in snapshot.roles {
        let role_id: RoleId = parse_id("roles[].id", role_json.id)?;
        let department_id: DepartmentId = parse_id("roles[].departmentId", role_json.department_id)?;
        if store.role(&role_id).is_some() {
            return Err(duplicate(EntityKind::Role, &role_id));
        }
        if store.department(&department_id).is_none() {
            return Err(StoreError::DanglingReference {
                kind: EntityKind::Role,
                id: role_id.to_string(),
                target_kind: EntityKind::Department,
                target_id: department_id.to_string(),
            });
        }
        store
            .roles_mut()
            .insert(role_id.clone(), Role::new(role_id, role_json.name, department_id));
    }

    for journey_json in snapshot.journeys {
        let journey_id: JourneyId = parse_id("journeys[].id", journey_json.id)?;
        let role_id: RoleId = parse_id("journeys[].roleId", journey_json.role_id)?;
        let progression_module_ids = parse_ids(
            "journeys[].progressionModuleIds[]",
            journey_json.progression_module_ids,
        )?;
        if store.role(&role_id).is_none() {
            return Err(StoreError::DanglingReference {
                kind: EntityKind::Journey,
                id: journey_id.to_string(),
                target_kind: EntityKind::Role,
                target_id: role_id.to_string(),
            });
        }
        if store.journey_of(&role_id).is_some() {
            return Err(duplicate(EntityKind::Journey, format!("{journey_id} (role {role_id})")));
        }
        store.journeys_mut().insert(
            role_id.clone(),
            Journey::new(journey_id, role_id).with_progression_module_ids(progression_module_ids),
        );
    }

    let mut chapter_ids = BTreeSet::new();
    for module_json in snapshot.modules {
        let module = module_from_json(module_json)?;
        if store.module(module.module_id()).is_some() {
            return Err(duplicate(EntityKind::Module, module.module_id()));
        }
        for chapter_id in module.chapter_ids() {
            if !chapter_ids.insert(chapter_id.clone()) {
                return Err(duplicate(EntityKind::Chapter, chapter_id));
            }
        }
        store.modules_mut().insert(module.module_id().clone(), module);
    }

    for learner_json in snapshot.learners {
        let learner_id: LearnerId = parse_id("learners[].id", learner_json.id)?;
        let role_ids: Vec<RoleId> = parse_ids("learners[].roleIds[]", learner_json.role_ids)?;
        let completed: Vec<ChapterId> = parse_ids(
            "learners[].completedChapterIds[]",
            learner_json.completed_chapter_ids,
        )?;
        if store.learner(&learner_id).is_some() {
            return Err(duplicate(EntityKind::Learner, &learner_id));
        }
        store.learners_mut().insert(
            learner_id.clone(),
            Learner::new(learner_id, learner_json.full_name)
                .with_roles(role_ids)
                .with_completed(completed)
                .with_admin(learner_json.is_admin),
        );
    }

    Ok(store)
}

fn module_from_json(module_json: ModuleJson) -> Result<TrainingModule, StoreError> {
    let module_id: ModuleId = parse_id("modules[].id", module_json.id)?;
    let target_role_ids: Vec<RoleId> =
        parse_ids("modules[].targetRoleIds[]", module_json.target_role_ids)?;
    let target_department_ids: Vec<DepartmentId> = parse_ids(
        "modules[].targetDepartmentIds[]",
        module_json.target_department_ids,
    )?;

    let mut chapters = Vec::with_capacity(module_json.chapters.len());
    for chapter_json in module_json.chapters {
        chapters.push(chapter_from_json(chapter_json)?);
    }

    let mut module = TrainingModule::new(module_id, module_json.title)
        .with_targets(target_role_ids, target_department_ids)
        .with_chapters(chapters);
    module.set_description(module_json.description);
    module.set_duration_minutes(module_json.duration_minutes);
    module.set_sequential(module_json.is_sequential);

    if module.is_compulsory() != module_json.is_compulsory {
        warn!(
            module = %module.module_id(),
            stored = module_json.is_compulsory,
            derived = module.is_compulsory(),
            "stale isCompulsory flag ignored"
        );
    }
    Ok(module)
}

fn chapter_from_json(chapter_json: ChapterJson) -> Result<Chapter, StoreError> {
    let chapter_id: ChapterId = parse_id("modules[].chapters[].id", chapter_json.id)?;
    let mut questions = Vec::with_capacity(chapter_json.questions.len());
    for question_json in chapter_json.questions {
        let question_id: QuestionId =
            parse_id("modules[].chapters[].questions[].id", question_json.id)?;
        let kind = match question_json.kind {
            QuestionTypeJson::Text => QuestionKind::Text,
            QuestionTypeJson::MultipleChoice => QuestionKind::MultipleChoice {
                options: question_json.options.unwrap_or_default(),
            },
        };
        questions.push(Question::new(
            question_id,
            question_json.text,
            kind,
            question_json.correct_answer,
        ));
    }

    Ok(
        Chapter::new(chapter_id, chapter_json.title, chapter_json.content_type.into())
            .with_content_url(chapter_json.content_url)
            .with_questions(questions),
    )
}

impl From<ContentTypeJson> for ContentType {
    fn from(content_type: ContentTypeJson) -> Self {
        match content_type {
            ContentTypeJson::Video => Self::Video,
            ContentTypeJson::Pdf => Self::Pdf,
            ContentTypeJson::Link => Self::Link,
        }
    }
}

impl From<ContentType> for ContentTypeJson {
    fn from(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Video => Self::Video,
            ContentType::Pdf => Self::Pdf,
            ContentType::Link => Self::Link,
        }
    }
}

fn store_to_json(store: &EntityStore) -> SnapshotJson {
    SnapshotJson {
        departments: store
            .departments()
            .values()
            .map(|department| DepartmentJson {
                id: department.department_id().to_string(),
                name: department.name().to_owned(),
                core_module_ids: ids_to_json(department.core_module_ids()),
            })
            .collect(),
        roles: store
            .roles()
            .values()
            .map(|role| RoleJson {
                id: role.role_id().to_string(),
                name: role.name().to_owned(),
                department_id: role.department_id().to_string(),
            })
            .collect(),
        journeys: store
            .journeys()
            .values()
            .map(|journey| JourneyJson {
                id: journey.journey_id().to_string(),
                role_id: journey.role_id().to_string(),
                progression_module_ids: ids_to_json(journey.progression_module_ids()),
            })
            .collect(),
        modules: store.modules().values().map(module_to_json).collect(),
        learners: store
            .learners()
            .values()
            .map(|learner| LearnerJson {
                id: learner.learner_id().to_string(),
                full_name: learner.name().to_owned(),
                role_ids: ids_to_json(learner.role_ids()),
                completed_chapter_ids: ids_to_json(learner.completed_chapter_ids()),
                is_admin: learner.is_admin(),
            })
            .collect(),
    }
}

fn module_to_json(module: &TrainingModule) -> ModuleJson {
    ModuleJson {
        id: module.module_id().to_string(),
        title: module.title().to_owned(),
        description: module.description().to_owned(),
        is_compulsory: module.is_compulsory(),
        target_role_ids: ids_to_json(module.target_role_ids()),
        target_department_ids: ids_to_json(module.target_department_ids()),
        duration_minutes: module.duration_minutes(),
        chapters: module
            .chapters()
            .iter()
            .map(|chapter| ChapterJson {
                id: chapter.chapter_id().to_string(),
                title: chapter.title().to_owned(),
                content_type: chapter.content_type().into(),
                content_url: chapter.content_url().to_owned(),
                questions: chapter
                    .questions()
                    .iter()
                    .map(|question| {
                        let (kind, options) = match question.kind() {
                            QuestionKind::Text => (QuestionTypeJson::Text, None),
                            QuestionKind::MultipleChoice { options } => {
                                (QuestionTypeJson::MultipleChoice, Some(options.clone()))
                            }
                        };
                        QuestionJson {
                            id: question.question_id().to_string(),
                            text: question.prompt().to_owned(),
                            kind,
                            options,
                            correct_answer: question.correct_answer().map(str::to_owned),
                        }
                    })
                    .collect(),
            })
            .collect(),
        is_sequential: module.is_sequential(),
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(path: &Path, contents: &[u8], durability: WriteDurability) -> Result<(), StoreError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|source| StoreError::Io {
        path: parent.to_path_buf(),
        source,
    })?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = parent.join(format!(
        ".pathwise.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    if let Err(source) = file.write_all(contents) {
        drop(file);
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: tmp_path,
            source,
        });
    }

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
