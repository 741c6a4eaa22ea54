//! The school registry module

use crate::config::RegistrarConfig;
use crate::core::entity::{Data, Entity};
use crate::core::module::Module;
use crate::core::service::{DataService, EntityService};
use crate::entities::school::*;
use crate::server::crud::CrudDescriptor;
use crate::server::entity_registry::EntityRegistry;
use crate::storage::InMemoryDataService;
use std::sync::Arc;

/// Every school entity, each with its own service
///
/// The services are public so that callers can seed data or run queries
/// without going through HTTP.
#[derive(Clone)]
pub struct SchoolModule {
    pub students: EntityService<Student>,
    pub teachers: EntityService<Teacher>,
    pub guardians: EntityService<Guardian>,
    pub departments: EntityService<Department>,
    pub subjects: EntityService<Subject>,
    pub courses: EntityService<Course>,
    pub classrooms: EntityService<Classroom>,
    pub enrollments: EntityService<Enrollment>,
    pub grades: EntityService<Grade>,
    pub attendance_records: EntityService<AttendanceRecord>,
    pub exams: EntityService<Exam>,
    pub timetable_slots: EntityService<TimetableSlot>,
    pub fee_payments: EntityService<FeePayment>,
    pub announcements: EntityService<Announcement>,
}

fn in_memory<T: Data>() -> EntityService<T> {
    let store: Arc<dyn DataService<T>> = Arc::new(InMemoryDataService::<T>::new());
    EntityService::new(store)
}

impl SchoolModule {
    /// All entities backed by empty in-memory stores
    pub fn in_memory() -> Self {
        Self {
            students: in_memory(),
            teachers: in_memory(),
            guardians: in_memory(),
            departments: in_memory(),
            subjects: in_memory(),
            courses: in_memory(),
            classrooms: in_memory(),
            enrollments: in_memory(),
            grades: in_memory(),
            attendance_records: in_memory(),
            exams: in_memory(),
            timetable_slots: in_memory(),
            fee_payments: in_memory(),
            announcements: in_memory(),
        }
    }
}

impl Default for SchoolModule {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn register<T: Data>(
    registry: &mut EntityRegistry,
    config: &RegistrarConfig,
    service: &EntityService<T>,
) {
    let singular = T::resource_name_singular();
    if !config.is_enabled(singular) {
        tracing::info!(entity = singular, "entity disabled by configuration");
        return;
    }
    let plural = config.plural_for(singular, T::resource_name());
    registry.register(Box::new(
        CrudDescriptor::new(service.clone(), config.query.clone()).with_plural(plural),
    ));
}

impl Module for SchoolModule {
    fn name(&self) -> &str {
        "school"
    }

    fn entity_types(&self) -> Vec<&str> {
        vec![
            Student::resource_name_singular(),
            Teacher::resource_name_singular(),
            Guardian::resource_name_singular(),
            Department::resource_name_singular(),
            Subject::resource_name_singular(),
            Course::resource_name_singular(),
            Classroom::resource_name_singular(),
            Enrollment::resource_name_singular(),
            Grade::resource_name_singular(),
            AttendanceRecord::resource_name_singular(),
            Exam::resource_name_singular(),
            TimetableSlot::resource_name_singular(),
            FeePayment::resource_name_singular(),
            Announcement::resource_name_singular(),
        ]
    }

    fn register_entities(&self, registry: &mut EntityRegistry, config: &RegistrarConfig) {
        register(registry, config, &self.students);
        register(registry, config, &self.teachers);
        register(registry, config, &self.guardians);
        register(registry, config, &self.departments);
        register(registry, config, &self.subjects);
        register(registry, config, &self.courses);
        register(registry, config, &self.classrooms);
        register(registry, config, &self.enrollments);
        register(registry, config, &self.grades);
        register(registry, config, &self.attendance_records);
        register(registry, config, &self.exams);
        register(registry, config, &self.timetable_slots);
        register(registry, config, &self.fee_payments);
        register(registry, config, &self.announcements);
    }
}
