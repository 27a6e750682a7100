use crate::models::MarkerCoordinates;

/// Typical on-image placement of well-known objects, in percent.
/// Names are lowercase; both Portuguese and English vocabulary is listed.
pub(crate) static KNOWN_POSITIONS: &[(&str, MarkerCoordinates)] = &[
    // Bathroom
    ("vaso sanitário", MarkerCoordinates::new(30.0, 70.0)),
    ("vaso sanitario", MarkerCoordinates::new(30.0, 70.0)),
    ("toilet", MarkerCoordinates::new(30.0, 70.0)),
    ("pia", MarkerCoordinates::new(55.0, 55.0)),
    ("sink", MarkerCoordinates::new(55.0, 55.0)),
    ("espelho", MarkerCoordinates::new(70.0, 25.0)),
    ("mirror", MarkerCoordinates::new(70.0, 25.0)),
    ("chuveiro", MarkerCoordinates::new(80.0, 20.0)),
    ("shower", MarkerCoordinates::new(80.0, 20.0)),
    ("box", MarkerCoordinates::new(80.0, 45.0)),
    ("toalheiro", MarkerCoordinates::new(15.0, 40.0)),
    ("armário de banheiro", MarkerCoordinates::new(60.0, 30.0)),
    // Kitchen
    ("geladeira", MarkerCoordinates::new(15.0, 45.0)),
    ("refrigerator", MarkerCoordinates::new(15.0, 45.0)),
    ("fogão", MarkerCoordinates::new(50.0, 60.0)),
    ("fogao", MarkerCoordinates::new(50.0, 60.0)),
    ("stove", MarkerCoordinates::new(50.0, 60.0)),
    ("micro-ondas", MarkerCoordinates::new(65.0, 35.0)),
    ("microwave", MarkerCoordinates::new(65.0, 35.0)),
    ("coifa", MarkerCoordinates::new(50.0, 20.0)),
    ("armário", MarkerCoordinates::new(40.0, 25.0)),
    ("cabinet", MarkerCoordinates::new(40.0, 25.0)),
    ("bancada", MarkerCoordinates::new(60.0, 55.0)),
    ("countertop", MarkerCoordinates::new(60.0, 55.0)),
    ("torneira", MarkerCoordinates::new(55.0, 50.0)),
    ("faucet", MarkerCoordinates::new(55.0, 50.0)),
    // Living room
    ("sofá", MarkerCoordinates::new(45.0, 65.0)),
    ("sofa", MarkerCoordinates::new(45.0, 65.0)),
    ("tv", MarkerCoordinates::new(50.0, 35.0)),
    ("televisão", MarkerCoordinates::new(50.0, 35.0)),
    ("television", MarkerCoordinates::new(50.0, 35.0)),
    ("rack", MarkerCoordinates::new(50.0, 55.0)),
    ("mesa de centro", MarkerCoordinates::new(50.0, 75.0)),
    ("coffee table", MarkerCoordinates::new(50.0, 75.0)),
    ("poltrona", MarkerCoordinates::new(20.0, 65.0)),
    ("armchair", MarkerCoordinates::new(20.0, 65.0)),
    ("tapete", MarkerCoordinates::new(50.0, 85.0)),
    ("rug", MarkerCoordinates::new(50.0, 85.0)),
    ("cortina", MarkerCoordinates::new(80.0, 35.0)),
    ("curtain", MarkerCoordinates::new(80.0, 35.0)),
    // Bedroom
    ("cama", MarkerCoordinates::new(50.0, 65.0)),
    ("bed", MarkerCoordinates::new(50.0, 65.0)),
    ("guarda-roupa", MarkerCoordinates::new(20.0, 40.0)),
    ("wardrobe", MarkerCoordinates::new(20.0, 40.0)),
    ("criado-mudo", MarkerCoordinates::new(75.0, 60.0)),
    ("nightstand", MarkerCoordinates::new(75.0, 60.0)),
    ("cômoda", MarkerCoordinates::new(80.0, 55.0)),
    ("dresser", MarkerCoordinates::new(80.0, 55.0)),
    ("escrivaninha", MarkerCoordinates::new(70.0, 60.0)),
    ("desk", MarkerCoordinates::new(70.0, 60.0)),
    // Generic fixtures
    ("porta", MarkerCoordinates::new(10.0, 50.0)),
    ("door", MarkerCoordinates::new(10.0, 50.0)),
    ("janela", MarkerCoordinates::new(75.0, 30.0)),
    ("window", MarkerCoordinates::new(75.0, 30.0)),
    ("luminária", MarkerCoordinates::new(50.0, 10.0)),
    ("lustre", MarkerCoordinates::new(50.0, 10.0)),
    ("lamp", MarkerCoordinates::new(50.0, 10.0)),
    ("ventilador de teto", MarkerCoordinates::new(50.0, 8.0)),
    ("ceiling fan", MarkerCoordinates::new(50.0, 8.0)),
    ("ar-condicionado", MarkerCoordinates::new(70.0, 15.0)),
    ("air conditioner", MarkerCoordinates::new(70.0, 15.0)),
    ("tomada", MarkerCoordinates::new(25.0, 80.0)),
    ("outlet", MarkerCoordinates::new(25.0, 80.0)),
    ("interruptor", MarkerCoordinates::new(15.0, 45.0)),
    ("light switch", MarkerCoordinates::new(15.0, 45.0)),
    ("piso", MarkerCoordinates::new(50.0, 90.0)),
    ("floor", MarkerCoordinates::new(50.0, 90.0)),
    ("parede", MarkerCoordinates::new(85.0, 50.0)),
    ("wall", MarkerCoordinates::new(85.0, 50.0)),
    ("teto", MarkerCoordinates::new(50.0, 5.0)),
    ("ceiling", MarkerCoordinates::new(50.0, 5.0)),
];

pub(crate) fn lookup(normalized_item: &str) -> Option<MarkerCoordinates> {
    KNOWN_POSITIONS
        .iter()
        .find(|(name, _)| *name == normalized_item)
        .map(|(_, coords)| *coords)
}
