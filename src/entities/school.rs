//! School-management entity set
//!
//! Each entity maps one table of the registrar database. Foreign keys are
//! plain UUID fields; no relationship is enforced at this layer.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

crate::impl_data_entity!(
    Student,
    "student",
    "students",
    ["first_name", "last_name", "email"],
    {
        first_name: String,
        last_name: String,
        email: String,
        date_of_birth: NaiveDate,
        enrollment_date: NaiveDate,
        /// School year the student is in (1-12)
        grade_level: i32,
        guardian_id: Option<Uuid>,
        is_active: bool,
    }
);

crate::impl_data_entity!(
    Teacher,
    "teacher",
    "teachers",
    ["first_name", "last_name", "email"],
    {
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        department_id: Option<Uuid>,
        hire_date: NaiveDate,
        salary: f64,
        is_active: bool,
    }
);

crate::impl_data_entity!(
    Guardian,
    "guardian",
    "guardians",
    ["first_name", "last_name", "email", "phone"],
    {
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
        /// Relationship to the student, e.g. "mother"
        relationship: String,
    }
);

crate::impl_data_entity!(
    Department,
    "department",
    "departments",
    ["name", "code"],
    {
        name: String,
        code: String,
        head_teacher_id: Option<Uuid>,
        budget: f64,
    }
);

crate::impl_data_entity!(
    Subject,
    "subject",
    "subjects",
    ["name", "code", "description"],
    {
        name: String,
        code: String,
        description: Option<String>,
        department_id: Uuid,
    }
);

crate::impl_data_entity!(
    Course,
    "course",
    "courses",
    ["title", "academic_year"],
    {
        subject_id: Uuid,
        teacher_id: Uuid,
        title: String,
        /// e.g. "2025-2026"
        academic_year: String,
        term: i32,
        credits: i32,
        max_students: i32,
    }
);

crate::impl_data_entity!(
    Classroom,
    "classroom",
    "classrooms",
    ["name", "building"],
    {
        name: String,
        building: String,
        floor: i32,
        capacity: i32,
        has_projector: bool,
    }
);

// No searchable list: free-text search covers every string field.
crate::impl_data_entity!(
    Enrollment,
    "enrollment",
    "enrollments",
    [],
    {
        student_id: Uuid,
        course_id: Uuid,
        enrolled_on: NaiveDate,
        /// "active", "withdrawn" or "completed"
        status: String,
    }
);

crate::impl_data_entity!(
    Grade,
    "grade",
    "grades",
    ["letter", "comment"],
    {
        student_id: Uuid,
        course_id: Uuid,
        exam_id: Option<Uuid>,
        score: f64,
        letter: String,
        graded_at: DateTime<Utc>,
        comment: Option<String>,
    }
);

crate::impl_data_entity!(
    AttendanceRecord,
    "attendance_record",
    "attendance_records",
    ["note"],
    {
        student_id: Uuid,
        course_id: Uuid,
        date: NaiveDate,
        present: bool,
        minutes_late: i32,
        note: Option<String>,
    }
);

crate::impl_data_entity!(
    Exam,
    "exam",
    "exams",
    ["title"],
    {
        course_id: Uuid,
        title: String,
        exam_date: NaiveDate,
        duration_minutes: i32,
        max_score: f64,
        classroom_id: Option<Uuid>,
    }
);

crate::impl_data_entity!(
    TimetableSlot,
    "timetable_slot",
    "timetable_slots",
    [],
    {
        course_id: Uuid,
        classroom_id: Uuid,
        /// 1 = Monday .. 7 = Sunday
        day_of_week: i32,
        /// "HH:MM", local school time
        start_time: String,
        end_time: String,
    }
);

crate::impl_data_entity!(
    FeePayment,
    "fee_payment",
    "fee_payments",
    ["reference"],
    {
        student_id: Uuid,
        amount: f64,
        currency: String,
        due_date: NaiveDate,
        paid_at: Option<DateTime<Utc>>,
        reference: String,
    }
);

crate::impl_data_entity!(
    Announcement,
    "announcement",
    "announcements",
    ["title", "body"],
    {
        title: String,
        body: String,
        author_id: Uuid,
        published_at: DateTime<Utc>,
        audience: String,
        pinned: bool,
    }
);
