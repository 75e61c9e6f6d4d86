use dioxus::prelude::*;
use timetable_types::room::RoomForm;
use timetable_types::Room;

use super::{department_options, optional};
use crate::app::components::{
    EmptyState, ErrorNotice, Modal, NumberField, PageHeader, SelectField, Spinner, TextField,
};
use crate::app::hooks::{use_departments, use_rooms};
use crate::app::state::use_app;
use crate::query::Mutation;
use crate::validation::validate_room;

const ROOM_TYPES: [&str; 4] = ["Lecture Hall", "Laboratory", "Tutorial Room", "Computer Lab"];

/// `"projector, wifi,,"` -> `["projector", "wifi"]`
fn parse_facilities(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Add,
    Edit(Room),
    Delete(Room),
}

#[component]
pub fn AdminRooms() -> Element {
    let rooms = use_rooms();
    let mut dialog = use_signal(|| Option::<Dialog>::None);

    let Some(rooms) = rooms.data() else {
        return match rooms.error() {
            Some(message) => rsx! { ErrorNotice { message } },
            None => rsx! { Spinner {} },
        };
    };

    rsx! {
        PageHeader {
            title: "Rooms",
            subtitle: format!("{} rooms", rooms.len()),
            actions: rsx! {
                button { onclick: move |_| dialog.set(Some(Dialog::Add)), "Add Room" }
            },
        }

        if rooms.is_empty() {
            EmptyState { title: "No rooms", message: "Add the rooms classes can be scheduled in." }
        } else {
            div { class: "overflow-auto",
                table {
                    thead {
                        tr {
                            th { "Code" }
                            th { "Name" }
                            th { "Capacity" }
                            th { "Building" }
                            th { "Type" }
                            th { "Facilities" }
                            th { "Status" }
                            th {}
                        }
                    }
                    tbody {
                        for room in rooms {
                            tr { key: "{room.id}",
                                td { strong { "{room.code}" } }
                                td { "{room.name}" }
                                td { "{room.capacity}" }
                                td {
                                    "{room.building().unwrap_or(\"-\")}"
                                    if let Some(floor) = room.floor {
                                        small { style: "display:block;", "Floor {floor}" }
                                    }
                                }
                                td { "{room.room_type.clone().unwrap_or_default()}" }
                                td {
                                    for facility in room.facilities.iter() {
                                        span { class: "badge", style: "margin-right:0.25rem;", "{facility}" }
                                    }
                                }
                                td {
                                    if room.is_available {
                                        span { class: "badge success", "Available" }
                                    } else {
                                        span { class: "badge warning", "Unavailable" }
                                    }
                                }
                                td {
                                    div { class: "actions",
                                        button {
                                            class: "outline secondary",
                                            onclick: {
                                                let room = room.clone();
                                                move |_| dialog.set(Some(Dialog::Edit(room.clone())))
                                            },
                                            "Edit"
                                        }
                                        button {
                                            class: "outline contrast",
                                            onclick: {
                                                let room = room.clone();
                                                move |_| dialog.set(Some(Dialog::Delete(room.clone())))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        {match dialog() {
            Some(Dialog::Add) => rsx! {
                RoomEditor { on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Edit(room)) => rsx! {
                RoomEditor { key: "{room.id}", room: room.clone(), on_close: move |_| dialog.set(None) }
            },
            Some(Dialog::Delete(room)) => rsx! {
                DeleteRoom { room: room.clone(), on_close: move |_| dialog.set(None) }
            },
            None => rsx! {},
        }}
    }
}

/// Add form, or edit form when `room` is given.
#[component]
fn RoomEditor(room: Option<Room>, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let departments = use_departments();
    let initial = room.as_ref().map(RoomForm::from).unwrap_or_default();
    let room_id = room.as_ref().map(|r| r.id.clone());

    let code = use_signal(|| initial.code.clone());
    let name = use_signal(|| initial.name.clone());
    let capacity = use_signal(|| initial.capacity);
    let department = use_signal(|| initial.department_id.clone());
    let building = use_signal(|| initial.building_location.clone().unwrap_or_default());
    let house = use_signal(|| initial.house.clone().unwrap_or_default());
    let floor = use_signal(|| initial.floor.map(|f| f.to_string()).unwrap_or_default());
    let room_type = use_signal(|| initial.room_type.clone().unwrap_or_default());
    let facilities = use_signal(|| initial.facilities.join(", "));
    let mut saving = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let floor_text = floor();
        let floor = match floor_text.trim() {
            "" => None,
            text => match text.parse::<i32>() {
                Ok(n) => Some(n),
                Err(_) => {
                    state.error("Invalid Floor", "Floor must be a whole number");
                    return;
                }
            },
        };
        let form = RoomForm {
            code: code().trim().to_string(),
            name: name().trim().to_string(),
            capacity: capacity(),
            department_id: department(),
            building_location: optional(&building()),
            house: optional(&house()),
            floor,
            room_type: optional(&room_type()),
            facilities: parse_facilities(&facilities()),
        };
        if let Err(err) = validate_room(&form) {
            state.invalid(&err);
            return;
        }
        let room_id = room_id.clone();
        saving.set(true);
        spawn(async move {
            let saved = match room_id {
                Some(id) => state
                    .mutate(Mutation::UpdateRoom, "Failed to update room", |api| async move {
                        api.update_room(&id, &form).await.map(|_| ())
                    })
                    .await
                    .map(|_| "Room updated"),
                None => state
                    .mutate(Mutation::AddRoom, "Failed to add room", |api| async move {
                        api.create_room(&form).await.map(|_| ())
                    })
                    .await
                    .map(|_| "Room added"),
            };
            saving.set(false);
            if let Some(message) = saved {
                state.success(message);
                on_close.call(());
            }
        });
    };

    let types: Vec<(String, String)> = ROOM_TYPES
        .iter()
        .map(|t| (t.to_string(), t.to_string()))
        .collect();
    let title = if room.is_some() { "Edit Room" } else { "Add Room" };

    rsx! {
        Modal { title, on_close: move |_| on_close.call(()),
            form { onsubmit,
                div { class: "grid",
                    TextField { label: "Room Code", value: code, placeholder: "LT-01", disabled: saving() }
                    TextField { label: "Room Name", value: name, disabled: saving() }
                    NumberField { label: "Capacity", value: capacity, min: 1, disabled: saving() }
                }
                SelectField {
                    label: "Department",
                    value: department,
                    options: department_options(&departments.data_or_default()),
                    placeholder: "Select a department",
                    disabled: saving(),
                }
                div { class: "grid",
                    TextField { label: "Building", value: building, disabled: saving() }
                    TextField { label: "House", value: house, placeholder: "Block A", disabled: saving() }
                    TextField { label: "Floor", value: floor, kind: "number", disabled: saving() }
                }
                SelectField {
                    label: "Room Type",
                    value: room_type,
                    options: types,
                    placeholder: "Select a type",
                    disabled: saving(),
                }
                TextField {
                    label: "Facilities",
                    value: facilities,
                    placeholder: "projector, wifi, whiteboard",
                    disabled: saving(),
                }
                button { r#type: "submit", aria_busy: "{saving}", disabled: saving(), "Save Room" }
            }
        }
    }
}

#[component]
fn DeleteRoom(room: Room, on_close: EventHandler<()>) -> Element {
    let state = use_app();
    let mut deleting = use_signal(|| false);
    let id = room.id.clone();

    let delete = move |_| {
        let id = id.clone();
        deleting.set(true);
        spawn(async move {
            let deleted = state
                .mutate(Mutation::DeleteRoom, "Failed to delete room", |api| async move {
                    api.delete_room(&id).await
                })
                .await;
            deleting.set(false);
            if deleted.is_some() {
                state.success("Room deleted");
                on_close.call(());
            }
        });
    };

    rsx! {
        Modal { title: "Delete room?", on_close: move |_| on_close.call(()),
            p { "{room.code} {room.name} will be removed." }
            footer {
                button { class: "secondary", onclick: move |_| on_close.call(()), "Cancel" }
                button { aria_busy: "{deleting}", disabled: deleting(), onclick: delete, "Delete" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_facilities() {
        assert_eq!(parse_facilities(" projector, wifi,, "), ["projector", "wifi"]);
        assert!(parse_facilities("").is_empty());
    }
}
