//! Demo Data
//!
//! A small brokerage used when no backend is configured.

use chrono::{DateTime, Duration, Utc};

use crate::domain::{
    Broker, BrokerStatus, CalendarEvent, Lead, LeadOrigin, LeadProperty, LeadStatus, NewLeadProperty, Owner, Property,
    PropertyStatus, PropertyType,
};

pub(crate) struct DemoData {
    pub leads: Vec<Lead>,
    pub brokers: Vec<Broker>,
    pub owners: Vec<Owner>,
    pub properties: Vec<Property>,
    pub events: Vec<CalendarEvent>,
    pub links: Vec<LeadProperty>,
}

fn link(id: &str, lead_id: &str, property_id: &str) -> LeadProperty {
    NewLeadProperty {
        lead_id: lead_id.to_string(),
        property_id: property_id.to_string(),
    }
    .into_link(id)
}

#[allow(clippy::too_many_arguments)]
fn lead(
    id: &str,
    name: &str,
    phone: &str,
    status: LeadStatus,
    origin: LeadOrigin,
    budget: Option<f64>,
    broker: Option<&str>,
    created: DateTime<Utc>,
) -> Lead {
    let mut lead = Lead::new(id, name, phone, status);
    lead.email = Some(format!("{}@email.com", name.split_whitespace().next().unwrap_or(id).to_lowercase()));
    lead.origin = origin.into();
    lead.budget = budget;
    lead.assigned_broker_id = broker.map(str::to_string);
    lead.created_at = created;
    lead.updated_at = created;
    lead
}

pub(crate) fn demo_data(now: DateTime<Utc>) -> DemoData {
    let days = |n: i64| now - Duration::days(n);

    let mut ana = Broker::new("b-ana", "Ana Costa", "ana@imobiliaria.com");
    ana.commission_rate = Some(5.0);
    let mut carlos = Broker::new("b-carlos", "Carlos Silva", "carlos@imobiliaria.com");
    carlos.commission_rate = Some(4.5);
    let mut julia = Broker::new("b-julia", "Julia Oliveira", "julia@imobiliaria.com");
    julia.status = BrokerStatus::OnVacation.into();

    let mut leads = vec![
        lead("L1", "João Silva", "(11) 98765-4321", LeadStatus::Contacted, LeadOrigin::SocialMedia, Some(450_000.0), Some("b-ana"), days(2)),
        lead("L2", "Maria Santos", "(11) 97654-3210", LeadStatus::VisitScheduled, LeadOrigin::Phone, Some(780_000.0), Some("b-carlos"), days(9)),
        lead("L3", "Pedro Costa", "(11) 96543-2109", LeadStatus::New, LeadOrigin::Website, None, None, days(0)),
        lead("L4", "Fernanda Lima", "(21) 99876-1234", LeadStatus::Negotiating, LeadOrigin::Referral, Some(1_200_000.0), Some("b-ana"), days(21)),
        lead("L5", "Ricardo Alves", "(31) 98123-4567", LeadStatus::Closed, LeadOrigin::Referral, Some(650_000.0), Some("b-ana"), days(40)),
        lead("L6", "Camila Rocha", "(11) 91234-5678", LeadStatus::Closed, LeadOrigin::Website, Some(920_000.0), Some("b-carlos"), days(75)),
        lead("L7", "Bruno Teixeira", "(19) 99887-6655", LeadStatus::Lost, LeadOrigin::Event, Some(300_000.0), Some("b-julia"), days(50)),
        lead("L8", "Patrícia Gomes", "(11) 95555-1212", LeadStatus::Qualified, LeadOrigin::Email, Some(540_000.0), Some("b-carlos"), days(5)),
    ];
    leads[0].tags = vec!["apartamento".to_string(), "zona sul".to_string()];
    leads[3].tags = vec!["cobertura".to_string()];
    leads[1].notes = Some("Quer 3 dormitórios perto do metrô".to_string());

    let mut helena = Owner::new("o-helena", "Helena Prado", "(11) 93333-2222");
    helena.email = Some("helena@email.com".to_string());
    let marcos = Owner::new("o-marcos", "Marcos Vieira", "(11) 94444-1111");

    let mut apto = Property::new("p-apto", "Apartamento Vila Mariana", "Rua Domingos de Morais, 1200", "São Paulo", "sp");
    apto.property_type = PropertyType::Apartment.into();
    apto.price = Some(780_000.0);
    apto.bedrooms = Some(3);
    apto.bathrooms = Some(2);
    apto.area = Some(92.5);
    apto.owner_id = Some(helena.id.clone());
    let mut casa = Property::new("p-casa", "Casa Alphaville", "Alameda Grajaú, 45", "Barueri", "SP");
    casa.property_type = PropertyType::House.into();
    casa.status = PropertyStatus::Reserved.into();
    casa.price = Some(1_200_000.0);
    casa.owner_id = Some(marcos.id.clone());
    let mut terreno = Property::new("p-terreno", "Terreno Atibaia", "Estrada do Rosário, km 3", "Atibaia", "SP");
    terreno.property_type = PropertyType::Land.into();

    let mut visit = CalendarEvent::new("e-visit", "Visita - Apto Vila Mariana", now + Duration::days(2), now + Duration::days(2) + Duration::hours(1));
    visit.lead_id = Some("L2".to_string());
    visit.property_id = Some(apto.id.clone());
    visit.broker_id = Some("b-carlos".to_string());
    let mut call = CalendarEvent::new("e-call", "Ligar para João Silva", now + Duration::hours(3), now + Duration::hours(3) + Duration::minutes(30));
    call.lead_id = Some("L1".to_string());
    let mut proposal = CalendarEvent::new("e-proposal", "Enviar proposta", now - Duration::days(1), now - Duration::days(1));
    proposal.lead_id = Some("L4".to_string());

    DemoData {
        leads,
        brokers: vec![ana, carlos, julia],
        owners: vec![helena, marcos],
        properties: vec![apto, casa, terreno],
        events: vec![visit, call, proposal],
        links: vec![
            link("lp-1", "L2", "p-apto"),
            link("lp-2", "L4", "p-casa"),
            link("lp-3", "L4", "p-apto"),
        ],
    }
}
