//! Command handlers. Each one runs a single operation and prints the outcome.

use crate::args::{AdoptionAction, DocumentAction, NewPet, PetAction, SettingsAction};
use ampa::Platform;
use ampa::domain::{AdopterId, AdoptionId, Pet, PetDraft, PetId, VolunteerId};
use ampa::features::catalog::PetFilter;
use anyhow::Result;

pub(crate) async fn pets(platform: &Platform, action: PetAction) -> Result<()> {
    let catalog = &platform.catalog;
    match action {
        PetAction::List { status, featured, species, search } => {
            let pets = match search {
                Some(term) => catalog.search_pets(&term),
                None => {
                    let filter = PetFilter {
                        status,
                        featured: featured.then_some(true),
                        species,
                        ..PetFilter::default()
                    };
                    catalog.list_pets(&filter)
                },
            };
            for pet in &pets {
                print_pet(pet);
            }
            println!("{} pet(s), {} featured", pets.len(), catalog.featured_count());
        },
        PetAction::Add(NewPet { name, color, story, breed, species, sex, featured }) => {
            let draft = PetDraft {
                name,
                breed,
                color,
                story,
                sex,
                species,
                is_featured: featured,
                ..PetDraft::default()
            };
            let pet = catalog.create_pet(draft).await?;
            print_pet(&pet);
        },
        PetAction::Feature { id, off } => {
            let pet = catalog.set_featured(PetId(id), !off).await?;
            print_pet(&pet);
        },
        PetAction::Status { id, status } => {
            let pet = catalog.set_status(PetId(id), status).await?;
            print_pet(&pet);
        },
    }
    Ok(())
}

pub(crate) async fn adoptions(platform: &Platform, action: AdoptionAction) -> Result<()> {
    let adoptions = &platform.adoptions;
    match action {
        AdoptionAction::Create { pet, adopter, volunteer } => {
            let adoption = adoptions
                .create_adoption(PetId(pet), AdopterId(adopter), volunteer.map(VolunteerId), None)
                .await?;
            println!("{} recorded at {}", adoption.id, adoption.adopted_at.to_rfc3339());
        },
        AdoptionAction::Delete { id } => {
            let removal = adoptions.delete_adoption(AdoptionId(id)).await?;
            let pet = removal.adoption.pet_id;
            if removal.pet_reverted {
                println!("{} deleted; {pet} is available again", removal.adoption.id);
            } else {
                println!("{} deleted; {pet} keeps its status", removal.adoption.id);
            }
        },
        AdoptionAction::List { search } => {
            let found = adoptions.search_adoptions(search.as_deref().unwrap_or_default());
            for s in &found {
                println!(
                    "{:>6}  {}  {:<20} {:<30} {}",
                    s.adoption.id.get(),
                    s.adoption.adopted_at.format("%Y-%m-%d"),
                    s.pet_name,
                    s.adopter_name,
                    s.volunteer_name.as_deref().unwrap_or("-"),
                );
            }
            println!("{} adoption(s)", found.len());
        },
    }
    Ok(())
}

pub(crate) async fn settings(platform: &Platform, action: SettingsAction) -> Result<()> {
    let settings = &platform.settings;
    match action {
        SettingsAction::Show => match settings.get_configuration() {
            Some(config) => println!("notification e-mail: {}", config.notification_email),
            None => println!("not configured; alerts go to {}", settings.notification_recipient()),
        },
        SettingsAction::Init { email } => {
            let config = settings.create_configuration(&email).await?;
            println!("{} created: {}", config.id, config.notification_email);
        },
        SettingsAction::SetEmail { email } => {
            let config = settings.update_configuration(&email).await?;
            println!("notification e-mail: {}", config.notification_email);
        },
    }
    Ok(())
}

pub(crate) fn documents(platform: &Platform, action: &DocumentAction) {
    match *action {
        DocumentAction::List { year, month } => {
            let report = platform.transparency.accountability_report(year, month);
            println!("Monthly statements:");
            for doc in &report.monthly {
                println!("  {}  {:<40} {}", doc.published_on, doc.title, doc.file);
            }
            println!("Annual statements:");
            for doc in &report.annual {
                println!("  {}  {:<40} {}", doc.published_on, doc.title, doc.file);
            }
            let years: Vec<String> = report.years.iter().map(ToString::to_string).collect();
            println!("Years: {}", years.join(", "));
        },
    }
}

fn print_pet(pet: &Pet) {
    println!(
        "{:>6}  {:<20} {:<3} {:<3} {:<12}{}",
        pet.id.get(),
        pet.name,
        pet.species,
        pet.sex,
        pet.status,
        if pet.is_featured { " *" } else { "" },
    );
}
