//! Test fixtures for ASC parser testing
//!
//! Provides representative ASC exports in both the native ALV layout
//! (`Date`/`Time` pair) and the newer layout with `Datetime` and
//! cumulant fit results.


/// Native ALV-5000 export with separate date and time lines
pub fn create_native_alv_asc() -> String {
    "ALV-5000/E-WIN Data\n\
Date :\t\"17.03.2016\"\n\
Time :\t\"15:41:38\"\n\
Samplename : \t\"Latex 100nm\"\n\
SampMemo(0) : \t\"\"\n\
SampMemo(1) : \t\"\"\n\
Temperature [K] :\t     298.15000\n\
Viscosity [cp]  :\t       0.89000\n\
Refractive Index:\t       1.33200\n\
Wavelength [nm] :\t     632.80000\n\
Angle [°]       :\t      90.00000\n\
Duration [s]    :\t        30\n\
Runs            :\t         1\n\
Mode            :\t\"SINGLE CROSS\"\n\
MeanCR0 [kHz]   :\t      19.48100\n\
\n\
\"Correlation\"\n\
  1.25000E-004\t  1.20437E+000\n\
  2.50000E-004\t  1.20290E+000\n\
\n\
\"Count Rate\"\n\
       2.50000\t      19.52131\n"
        .to_string()
}

/// Newer export with a combined timestamp, device info and cumulant fit
pub fn create_cumulant_asc() -> String {
    "ALV-7004 CGS-8F Data\n\
Data File Version 1.0\n\
Samplename : \"PS beads\"\n\
Device Info : \"ALV-CGS3/Compact/v2\"\n\
Datetime : 2021-06-04 10:15:00\n\
Duration [s] : 120\n\
Wavelength [nm] : 633\n\
Temperature [K] : 298.1\n\
Viscosity [cp] : 0.8872\n\
Refractive Index : 1.332\n\
Angle [°] : 90\n\
Cumulant 2.Order\n\
Expansion Parameter µ2 : 0.0412\n\
Diffusion Coefficient 2. order fit [µm²/s] : 4.3512\n\
Hydrodynamic Radius 2. order fit [nm] : 56.31\n"
        .to_string()
}

/// Multi-angle export reporting one block per detector
pub fn create_multi_angle_asc() -> String {
    "Samplename\tSilica\n\
Device Info\tALV-CGS3/MultiAngle\n\
Datetime\t2021-06-04 11:00:00\n\
Duration [s]\t60\n\
Angle [°]\t30\n\
Temperature [K]\t298.2\n\
Angle [°]\t90\n\
Temperature [K]\t298.3\n\
Angle [°]\t150\n\
Temperature [K]\t298.4\n"
        .to_string()
}

/// Split fixture content into owned lines the way the file adapter does
pub fn to_lines(content: &str) -> Vec<String> {
    content.lines().map(str::to_string).collect()
}
