use dioxus::prelude::*;
use timetable_types::{Course, Department};

use crate::app::components::{EmptyState, ErrorNotice, PageHeader, Spinner, TextField};
use crate::app::hooks::{use_courses, use_departments};
use crate::app::state::use_app;
use crate::app::Route;
use crate::query::Mutation;
use crate::validation::validate_department_name;

fn courses_in<'a>(department: &Department, courses: &'a [Course]) -> Vec<&'a Course> {
    courses
        .iter()
        .filter(|c| c.department_id.as_deref() == Some(department.id.as_str()))
        .collect()
}

#[component]
pub fn AdminDepartments() -> Element {
    let departments = use_departments();
    let courses = use_courses();

    let Some(departments) = departments.data() else {
        return match departments.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };
    let courses = courses.data_or_default();

    rsx! {
        PageHeader { title: "Departments", subtitle: "Academic departments and their courses" }
        NewDepartmentForm {}

        if departments.is_empty() {
            EmptyState { title: "No departments", message: "Create the first department above." }
        } else {
            div { class: "card-grid",
                for department in departments {
                    article { key: "{department.id}",
                        header { strong { "{department.name}" } }
                        {
                            let listed = courses_in(&department, &courses);
                            rsx! {
                                if listed.is_empty() {
                                    small { class: "muted", "No courses yet" }
                                } else {
                                    ul {
                                        for course in listed {
                                            li { key: "{course.id}",
                                                Link {
                                                    to: Route::AdminCourseDetail { course_id: course.id.clone() },
                                                    "{course.code}"
                                                }
                                                " {course.name}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn NewDepartmentForm() -> Element {
    let state = use_app();
    let mut name = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let department = match validate_department_name(&name()) {
            Ok(department) => department,
            Err(err) => {
                state.invalid(&err);
                return;
            }
        };
        saving.set(true);
        spawn(async move {
            let saved = state
                .mutate(Mutation::CreateDepartment, "Failed to create department", |api| async move {
                    api.create_department(&department).await
                })
                .await;
            saving.set(false);
            if saved.is_some() {
                name.set(String::new());
                state.success("Department created");
            }
        });
    };

    rsx! {
        article {
            form { onsubmit,
                div { class: "grid",
                    TextField { label: "Department Name", value: name, placeholder: "Computer Science", disabled: saving() }
                    label {
                        " "
                        button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Add Department" }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_courses_in_department() {
        let department = Department {
            id: "d1".into(),
            name: "Computing".into(),
            college_id: None,
        };
        let courses: Vec<Course> = serde_json::from_str(
            r#"[
                {"id": "c1", "code": "CS", "name": "Computer Science", "department_id": "d1"},
                {"id": "c2", "code": "EE", "name": "Electrical", "department_id": "d2"},
                {"id": "c3", "code": "IT", "name": "Information Technology", "department_id": "d1"}
            ]"#,
        )
        .unwrap();
        let codes: Vec<_> = courses_in(&department, &courses).iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, ["CS", "IT"]);
    }
}
