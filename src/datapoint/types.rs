//! The KNX datapoint type table.
//!
//! Every datapoint type known to the codec, with its symbolic name, the
//! value format its payload uses and its `main.sub` number.

use core::fmt;
use core::fmt::Write as _;

/// Longest rendered id: `65535.65535`.
const ID_CAPACITY: usize = 12;

datapoint_types! {
    Switch => ("DPT_Switch", "B1", 1, 1),
    Bool => ("DPT_Bool", "B1", 1, 2),
    Enable => ("DPT_Enable", "B1", 1, 3),
    Ramp => ("DPT_Ramp", "B1", 1, 4),
    Alarm => ("DPT_Alarm", "B1", 1, 5),
    BinaryValue => ("DPT_BinaryValue", "B1", 1, 6),
    Step => ("DPT_Step", "B1", 1, 7),
    UpDown => ("DPT_UpDown", "B1", 1, 8),
    OpenClose => ("DPT_OpenClose", "B1", 1, 9),
    Start => ("DPT_Start", "B1", 1, 10),
    State => ("DPT_State", "B1", 1, 11),
    Invert => ("DPT_Invert", "B1", 1, 12),
    DimSendStyle => ("DPT_DimSendStyle", "B1", 1, 13),
    InputSource => ("DPT_InputSource", "B1", 1, 14),
    Reset => ("DPT_Reset", "B1", 1, 15),
    Ack => ("DPT_Ack", "B1", 1, 16),
    Trigger => ("DPT_Trigger", "B1", 1, 17),
    Occupancy => ("DPT_Occupancy", "B1", 1, 18),
    WindowDoor => ("DPT_Window_Door", "B1", 1, 19),
    LogicalFunction => ("DPT_LogicalFunction", "B1", 1, 21),
    SceneAB => ("DPT_Scene_AB", "B1", 1, 22),
    ShutterBlindsMode => ("DPT_ShutterBlinds_Mode", "B1", 1, 23),
    HeatCool => ("DPT_Heat_Cool", "B1", 1, 100),
    SwitchControl => ("DPT_Switch_Control", "B2", 2, 1),
    BoolControl => ("DPT_Bool_Control", "B2", 2, 2),
    EnableControl => ("DPT_Enable_Control", "B2", 2, 3),
    RampControl => ("DPT_Ramp_Control", "B2", 2, 4),
    AlarmControl => ("DPT_Alarm_Control", "B2", 2, 5),
    BinaryValueControl => ("DPT_BinaryValue_Control", "B2", 2, 6),
    StepControl => ("DPT_Step_Control", "B2", 2, 7),
    Direction1Control => ("DPT_Direction1_Control", "B2", 2, 8),
    Direction2Control => ("DPT_Direction2_Control", "B2", 2, 9),
    StartControl => ("DPT_Start_Control", "B2", 2, 10),
    StateControl => ("DPT_State_Control", "B2", 2, 11),
    InvertControl => ("DPT_Invert_Control", "B2", 2, 12),
    ControlDimming => ("DPT_Control_Dimming", "B1U3", 3, 7),
    ControlBlinds => ("DPT_Control_Blinds", "B1U3", 3, 8),
    CharASCII => ("DPT_Char_ASCII", "A8_ASCII", 4, 1),
    Char88591 => ("DPT_Char_8859_1", "A8_8859_1", 4, 2),
    Scaling => ("DPT_Scaling", "U8", 5, 1),
    Angle => ("DPT_Angle", "U8", 5, 3),
    PercentU8 => ("DPT_Percent_U8", "U8", 5, 4),
    DecimalFactor => ("DPT_DecimalFactor", "U8", 5, 5),
    Tariff => ("DPT_Tariff", "U8", 5, 6),
    Value1Ucount => ("DPT_Value_1_Ucount", "U8", 5, 10),
    PercentV8 => ("DPT_Percent_V8", "V8", 6, 1),
    Value1Count => ("DPT_Value_1_Count", "V8", 6, 10),
    StatusMode3 => ("DPT_Status_Mode3", "B5N3", 6, 20),
    Value2Ucount => ("DPT_Value_2_Ucount", "U16", 7, 1),
    TimePeriodMsec => ("DPT_TimePeriodMsec", "U16", 7, 2),
    TimePeriod10MSec => ("DPT_TimePeriod10MSec", "U16", 7, 3),
    TimePeriod100MSec => ("DPT_TimePeriod100MSec", "U16", 7, 4),
    TimePeriodSec => ("DPT_TimePeriodSec", "U16", 7, 5),
    TimePeriodMin => ("DPT_TimePeriodMin", "U16", 7, 6),
    TimePeriodHrs => ("DPT_TimePeriodHrs", "U16", 7, 7),
    PropDataType => ("DPT_PropDataType", "U16", 7, 10),
    LengthMm => ("DPT_Length_mm", "U16", 7, 11),
    UElCurrentmA => ("DPT_UElCurrentmA", "U16", 7, 12),
    Brightness => ("DPT_Brightness", "U16", 7, 13),
    Value2Count => ("DPT_Value_2_Count", "V16", 8, 1),
    DeltaTimeMsec => ("DPT_DeltaTimeMsec", "V16", 8, 2),
    DeltaTime10MSec => ("DPT_DeltaTime10MSec", "V16", 8, 3),
    DeltaTime100MSec => ("DPT_DeltaTime100MSec", "V16", 8, 4),
    DeltaTimeSec => ("DPT_DeltaTimeSec", "V16", 8, 5),
    DeltaTimeMin => ("DPT_DeltaTimeMin", "V16", 8, 6),
    DeltaTimeHrs => ("DPT_DeltaTimeHrs", "V16", 8, 7),
    PercentV16 => ("DPT_Percent_V16", "V16", 8, 10),
    RotationAngle => ("DPT_Rotation_Angle", "V16", 8, 11),
    ValueTemp => ("DPT_Value_Temp", "F16", 9, 1),
    ValueTempd => ("DPT_Value_Tempd", "F16", 9, 2),
    ValueTempa => ("DPT_Value_Tempa", "F16", 9, 3),
    ValueLux => ("DPT_Value_Lux", "F16", 9, 4),
    ValueWsp => ("DPT_Value_Wsp", "F16", 9, 5),
    ValuePres => ("DPT_Value_Pres", "F16", 9, 6),
    ValueHumidity => ("DPT_Value_Humidity", "F16", 9, 7),
    ValueAirQuality => ("DPT_Value_AirQuality", "F16", 9, 8),
    ValueTime1 => ("DPT_Value_Time1", "F16", 9, 10),
    ValueTime2 => ("DPT_Value_Time2", "F16", 9, 11),
    ValueVolt => ("DPT_Value_Volt", "F16", 9, 20),
    ValueCurr => ("DPT_Value_Curr", "F16", 9, 21),
    PowerDensity => ("DPT_PowerDensity", "F16", 9, 22),
    KelvinPerPercent => ("DPT_KelvinPerPercent", "F16", 9, 23),
    Power => ("DPT_Power", "F16", 9, 24),
    ValueVolumeFlow => ("DPT_Value_Volume_Flow", "F16", 9, 25),
    RainAmount => ("DPT_Rain_Amount", "F16", 9, 26),
    ValueTempF => ("DPT_Value_Temp_F", "F16", 9, 27),
    ValueWspKmh => ("DPT_Value_Wsp_kmh", "F16", 9, 28),
    TimeOfDay => ("DPT_TimeOfDay", "N3N5r2N6r2N6", 10, 1),
    Date => ("DPT_Date", "r3N5r4N4r1U7", 11, 1),
    Value4Ucount => ("DPT_Value_4_Ucount", "U32", 12, 1),
    Value4Count => ("DPT_Value_4_Count", "V32", 13, 1),
    FlowRateM3h => ("DPT_FlowRate_m3h", "V32", 13, 2),
    ActiveEnergy => ("DPT_ActiveEnergy", "V32", 13, 10),
    ApparantEnergy => ("DPT_ApparantEnergy", "V32", 13, 11),
    ReactiveEnergy => ("DPT_ReactiveEnergy", "V32", 13, 12),
    ActiveEnergyKWh => ("DPT_ActiveEnergy_kWh", "V32", 13, 13),
    ApparantEnergyKVAh => ("DPT_ApparantEnergy_kVAh", "V32", 13, 14),
    ReactiveEnergyKVARh => ("DPT_ReactiveEnergy_kVARh", "V32", 13, 15),
    LongDeltaTimeSec => ("DPT_LongDeltaTimeSec", "V32", 13, 100),
    ValueAcceleration => ("DPT_Value_Acceleration", "F32", 14, 0),
    ValueAccelerationAngular => ("DPT_Value_Acceleration_Angular", "F32", 14, 1),
    ValueActivationEnergy => ("DPT_Value_Activation_Energy", "F32", 14, 2),
    ValueActivity => ("DPT_Value_Activity", "F32", 14, 3),
    ValueMol => ("DPT_Value_Mol", "F32", 14, 4),
    ValueAmplitude => ("DPT_Value_Amplitude", "F32", 14, 5),
    ValueAngleRad => ("DPT_Value_AngleRad", "F32", 14, 6),
    ValueAngleDeg => ("DPT_Value_AngleDeg", "F32", 14, 7),
    ValueAngularMomentum => ("DPT_Value_Angular_Momentum", "F32", 14, 8),
    ValueAngularVelocity => ("DPT_Value_Angular_Velocity", "F32", 14, 9),
    ValueArea => ("DPT_Value_Area", "F32", 14, 10),
    ValueCapacitance => ("DPT_Value_Capacitance", "F32", 14, 11),
    ValueChargeDensitySurface => ("DPT_Value_Charge_DensitySurface", "F32", 14, 12),
    ValueChargeDensityVolume => ("DPT_Value_Charge_DensityVolume", "F32", 14, 13),
    ValueCompressibility => ("DPT_Value_Compressibility", "F32", 14, 14),
    ValueConductance => ("DPT_Value_Conductance", "F32", 14, 15),
    ValueElectricalConductivity => ("DPT_Value_Electrical_Conductivity", "F32", 14, 16),
    ValueDensity => ("DPT_Value_Density", "F32", 14, 17),
    ValueElectricCharge => ("DPT_Value_Electric_Charge", "F32", 14, 18),
    ValueElectricCurrent => ("DPT_Value_Electric_Current", "F32", 14, 19),
    ValueElectricCurrentDensity => ("DPT_Value_Electric_CurrentDensity", "F32", 14, 20),
    ValueElectricDipoleMoment => ("DPT_Value_Electric_DipoleMoment", "F32", 14, 21),
    ValueElectricDisplacement => ("DPT_Value_Electric_Displacement", "F32", 14, 22),
    ValueElectricFieldStrength => ("DPT_Value_Electric_FieldStrength", "F32", 14, 23),
    ValueElectricFlux => ("DPT_Value_Electric_Flux", "F32", 14, 24),
    ValueElectricFluxDensity => ("DPT_Value_Electric_FluxDensity", "F32", 14, 25),
    ValueElectricPolarization => ("DPT_Value_Electric_Polarization", "F32", 14, 26),
    ValueElectricPotential => ("DPT_Value_Electric_Potential", "F32", 14, 27),
    ValueElectricPotentialDifference => ("DPT_Value_Electric_PotentialDifference", "F32", 14, 28),
    ValueElectromagneticMoment => ("DPT_Value_ElectromagneticMoment", "F32", 14, 29),
    ValueElectromotiveForce => ("DPT_Value_Electromotive_Force", "F32", 14, 30),
    ValueEnergy => ("DPT_Value_Energy", "F32", 14, 31),
    ValueForce => ("DPT_Value_Force", "F32", 14, 32),
    ValueFrequency => ("DPT_Value_Frequency", "F32", 14, 33),
    ValueAngularFrequency => ("DPT_Value_Angular_Frequency", "F32", 14, 34),
    ValueHeatCapacity => ("DPT_Value_Heat_Capacity", "F32", 14, 35),
    ValueHeatFlowRate => ("DPT_Value_Heat_FlowRate", "F32", 14, 36),
    ValueHeatQuantity => ("DPT_Value_Heat_Quantity", "F32", 14, 37),
    ValueImpedance => ("DPT_Value_Impedance", "F32", 14, 38),
    ValueLength => ("DPT_Value_Length", "F32", 14, 39),
    ValueLightQuantity => ("DPT_Value_Light_Quantity", "F32", 14, 40),
    ValueLuminance => ("DPT_Value_Luminance", "F32", 14, 41),
    ValueLuminousFlux => ("DPT_Value_Luminous_Flux", "F32", 14, 42),
    ValueLuminousIntensity => ("DPT_Value_Luminous_Intensity", "F32", 14, 43),
    ValueMagneticFieldStrength => ("DPT_Value_Magnetic_FieldStrength", "F32", 14, 44),
    ValueMagneticFlux => ("DPT_Value_Magnetic_Flux", "F32", 14, 45),
    ValueMagneticFluxDensity => ("DPT_Value_Magnetic_FluxDensity", "F32", 14, 46),
    ValueMagneticMoment => ("DPT_Value_Magnetic_Moment", "F32", 14, 47),
    ValueMagneticPolarization => ("DPT_Value_Magnetic_Polarization", "F32", 14, 48),
    ValueMagnetization => ("DPT_Value_Magnetization", "F32", 14, 49),
    ValueMagnetomotiveForce => ("DPT_Value_MagnetomotiveForce", "F32", 14, 50),
    ValueMass => ("DPT_Value_Mass", "F32", 14, 51),
    ValueMassFlux => ("DPT_Value_MassFlux", "F32", 14, 52),
    ValueMomentum => ("DPT_Value_Momentum", "F32", 14, 53),
    ValuePhaseAngleRad => ("DPT_Value_Phase_AngleRad", "F32", 14, 54),
    ValuePhaseAngleDeg => ("DPT_Value_Phase_AngleDeg", "F32", 14, 55),
    ValuePower => ("DPT_Value_Power", "F32", 14, 56),
    ValuePowerFactor => ("DPT_Value_Power_Factor", "F32", 14, 57),
    ValuePressure => ("DPT_Value_Pressure", "F32", 14, 58),
    ValueReactance => ("DPT_Value_Reactance", "F32", 14, 59),
    ValueResistance => ("DPT_Value_Resistance", "F32", 14, 60),
    ValueResistivity => ("DPT_Value_Resistivity", "F32", 14, 61),
    ValueSelfInductance => ("DPT_Value_SelfInductance", "F32", 14, 62),
    ValueSolidAngle => ("DPT_Value_SolidAngle", "F32", 14, 63),
    ValueSoundIntensity => ("DPT_Value_Sound_Intensity", "F32", 14, 64),
    ValueSpeed => ("DPT_Value_Speed", "F32", 14, 65),
    ValueStress => ("DPT_Value_Stress", "F32", 14, 66),
    ValueSurfaceTension => ("DPT_Value_Surface_Tension", "F32", 14, 67),
    ValueCommonTemperature => ("DPT_Value_Common_Temperature", "F32", 14, 68),
    ValueAbsoluteTemperature => ("DPT_Value_Absolute_Temperature", "F32", 14, 69),
    ValueTemperatureDifference => ("DPT_Value_TemperatureDifference", "F32", 14, 70),
    ValueThermalCapacity => ("DPT_Value_Thermal_Capacity", "F32", 14, 71),
    ValueThermalConductivity => ("DPT_Value_Thermal_Conductivity", "F32", 14, 72),
    ValueThermoelectricPower => ("DPT_Value_ThermoelectricPower", "F32", 14, 73),
    ValueTime => ("DPT_Value_Time", "F32", 14, 74),
    ValueTorque => ("DPT_Value_Torque", "F32", 14, 75),
    ValueVolume => ("DPT_Value_Volume", "F32", 14, 76),
    ValueVolumeFlux => ("DPT_Value_Volume_Flux", "F32", 14, 77),
    ValueWeight => ("DPT_Value_Weight", "F32", 14, 78),
    ValueWork => ("DPT_Value_Work", "F32", 14, 79),
    AccessData => ("DPT_Access_Data", "U4U4U4U4U4U4B4N4", 15, 0),
    StringASCII => ("DPT_String_ASCII", "A112_ASCII", 16, 0),
    String88591 => ("DPT_String_8859_1", "A112_8859_1", 16, 1),
    SceneNumber => ("DPT_SceneNumber", "r2U6", 17, 1),
    SceneControl => ("DPT_SceneControl", "B1r1U6", 18, 1),
    DateTime => ("DPT_DateTime", "U8r4U4r3U5U3U5r2U6r2U6B16", 19, 1),
    SCLOMode => ("DPT_SCLOMode", "N8", 20, 1),
    BuildingMode => ("DPT_BuildingMode", "N8", 20, 2),
    OccMode => ("DPT_OccMode", "N8", 20, 3),
    Priority => ("DPT_Priority", "N8", 20, 4),
    LightApplicationMode => ("DPT_LightApplicationMode", "N8", 20, 5),
    ApplicationArea => ("DPT_ApplicationArea", "N8", 20, 6),
    AlarmClassType => ("DPT_AlarmClassType", "N8", 20, 7),
    PSUMode => ("DPT_PSUMode", "N8", 20, 8),
    ErrorClassSystem => ("DPT_ErrorClass_System", "N8", 20, 11),
    ErrorClassHVAC => ("DPT_ErrorClass_HVAC", "N8", 20, 12),
    TimeDelay => ("DPT_Time_Delay", "N8", 20, 13),
    BeaufortWindForceScale => ("DPT_Beaufort_Wind_Force_Scale", "N8", 20, 14),
    SensorSelect => ("DPT_SensorSelect", "N8", 20, 17),
    ActuatorConnectType => ("DPT_ActuatorConnectType", "N8", 20, 20),
    FuelType => ("DPT_FuelType", "N8", 20, 100),
    BurnerType => ("DPT_BurnerType", "N8", 20, 101),
    HVACMode => ("DPT_HVACMode", "N8", 20, 102),
    DHWMode => ("DPT_DHWMode", "N8", 20, 103),
    LoadPriority => ("DPT_LoadPriority", "N8", 20, 104),
    HVACContrMode => ("DPT_HVACContrMode", "N8", 20, 105),
    HVACEmergMode => ("DPT_HVACEmergMode", "N8", 20, 106),
    ChangeoverMode => ("DPT_ChangeoverMode", "N8", 20, 107),
    ValveMode => ("DPT_ValveMode", "N8", 20, 108),
    DamperMode => ("DPT_DamperMode", "N8", 20, 109),
    HeaterMode => ("DPT_HeaterMode", "N8", 20, 110),
    FanMode => ("DPT_FanMode", "N8", 20, 111),
    MasterSlaveMode => ("DPT_MasterSlaveMode", "N8", 20, 112),
    StatusRoomSetp => ("DPT_StatusRoomSetp", "N8", 20, 113),
    ADAType => ("DPT_ADAType", "N8", 20, 120),
    BackupMode => ("DPT_BackupMode", "N8", 20, 121),
    StartSynchronization => ("DPT_StartSynchronization", "N8", 20, 122),
    BehaviourLockUnlock => ("DPT_Behaviour_Lock_Unlock", "N8", 20, 600),
    BehaviourBusPowerUpDown => ("DPT_Behaviour_Bus_Power_Up_Down", "N8", 20, 601),
    DALIFadeTime => ("DPT_DALI_Fade_Time", "N8", 20, 602),
    BlinkingMode => ("DPT_BlinkingMode", "N8", 20, 603),
    LightControlMode => ("DPT_LightControlMode", "N8", 20, 604),
    SwitchPBModel => ("DPT_SwitchPBModel", "N8", 20, 605),
    PBAction => ("DPT_PBAction", "N8", 20, 606),
    DimmPBModel => ("DPT_DimmPBModel", "N8", 20, 607),
    SwitchOnMode => ("DPT_SwitchOnMode", "N8", 20, 608),
    LoadTypeSet => ("DPT_LoadTypeSet", "N8", 20, 609),
    LoadTypeDetected => ("DPT_LoadTypeDetected", "N8", 20, 610),
    SABExceptBehaviour => ("DPT_SABExceptBehaviour", "N8", 20, 801),
    SABBehaviourLockUnlock => ("DPT_SABBehaviour_Lock_Unlock", "N8", 20, 802),
    SSSBMode => ("DPT_SSSBMode", "N8", 20, 803),
    BlindsControlMode => ("DPT_BlindsControlMode", "N8", 20, 804),
    CommMode => ("DPT_CommMode", "N8", 20, 1000),
    AddInfoTypes => ("DPT_AddInfoTypes", "N8", 20, 1001),
    RFModeSelect => ("DPT_RF_ModeSelect", "N8", 20, 1002),
    RFFilterSelect => ("DPT_RF_FilterSelect", "N8", 20, 1003),
    StatusGen => ("DPT_StatusGen", "B8", 21, 1),
    DeviceControl => ("DPT_Device_Control", "B8", 21, 2),
    ForceSign => ("DPT_ForceSign", "B8", 21, 100),
    ForceSignCool => ("DPT_ForceSignCool", "B8", 21, 101),
    StatusRHC => ("DPT_StatusRHC", "B8", 21, 102),
    StatusSDHWC => ("DPT_StatusSDHWC", "B8", 21, 103),
    FuelTypeSet => ("DPT_FuelTypeSet", "B8", 21, 104),
    StatusRCC => ("DPT_StatusRCC", "B8", 21, 105),
    StatusAHU => ("DPT_StatusAHU", "B8", 21, 106),
    LightActuatorErrorInfo => ("DPT_LightActuatorErrorInfo", "B8", 21, 601),
    RFModeInfo => ("DPT_RF_ModeInfo", "B8", 21, 1000),
    RFFilterInfo => ("DPT_RF_FilterInfo", "B8", 21, 1001),
    ChannelActivation8 => ("DPT_Channel_Activation_8", "B8", 21, 1010),
    StatusDHWC => ("DPT_StatusDHWC", "B16", 22, 100),
    StatusRHCC => ("DPT_StatusRHCC", "B16", 22, 101),
    Media => ("DPT_Media", "B16", 22, 1000),
    ChannelActivation16 => ("DPT_Channel_Activation_16", "B16", 22, 1010),
    OnOffAction => ("DPT_OnOff_Action", "N2", 23, 1),
    AlarmReaction => ("DPT_Alarm_Reaction", "N2", 23, 2),
    UpDownAction => ("DPT_UpDown_Action", "N2", 23, 3),
    HVACPBAction => ("DPT_HVAC_PB_Action", "N2", 23, 102),
    VarString88591 => ("DPT_VarString_8859_1", "An_8859_1", 24, 1),
    DoubleNibble => ("DPT_DoubleNibble", "U4U4", 25, 1000),
    SceneInfo => ("DPT_SceneInfo", "r1b1U6", 26, 1),
    CombinedInfoOnOff => ("DPT_CombinedInfoOnOff", "B32", 27, 1),
    UTF8 => ("DPT_UTF_8", "An_UTF_8", 28, 1),
    ActiveEnergyV64 => ("DPT_ActiveEnergy_V64", "V64", 29, 10),
    ApparantEnergyV64 => ("DPT_ApparantEnergy_V64", "V64", 29, 11),
    ReactiveEnergyV64 => ("DPT_ReactiveEnergy_V64", "V64", 29, 12),
    ChannelActivation24 => ("DPT_Channel_Activation_24", "B24", 30, 1010),
    PBActionHVACExtended => ("DPT_PB_Action_HVAC_Extended", "N3", 31, 101),
    HeatCoolZ => ("DPT_Heat_Cool_Z", "B1Z8HeatingOrCoolingZ", 200, 100),
    BinaryValueZ => ("DPT_BinaryValue_Z", "B1Z8BinaryValueZ", 200, 101),
    HVACModeZ => ("DPT_HVACMode_Z", "N8Z8HvacOperatingMode", 201, 100),
    DHWModeZ => ("DPT_DHWMode_Z", "N8Z8DhwMode", 201, 102),
    HVACContrModeZ => ("DPT_HVACContrMode_Z", "N8Z8HvacControllingMode", 201, 104),
    EnablHCstageZDPTEnablHCStage => ("DPT_EnablH_Cstage_Z_DPT_EnablH_CStage", "N8Z8EnableHeatingOrCoolingStage", 201, 105),
    BuildingModeZ => ("DPT_BuildingMode_Z", "N8Z8BuildingMode", 201, 107),
    OccModeZ => ("DPT_OccMode_Z", "N8Z8OccupancyMode", 201, 108),
    HVACEmergModeZ => ("DPT_HVACEmergMode_Z", "N8Z8EmergencyMode", 201, 109),
    RelValueZ => ("DPT_RelValue_Z", "U8Z8Rel", 202, 1),
    UCountValue8Z => ("DPT_UCountValue8_Z", "U8Z8Counter", 202, 2),
    TimePeriodMsecZ => ("DPT_TimePeriodMsec_Z", "U16Z8TimePeriod", 203, 2),
    TimePeriod10MsecZ => ("DPT_TimePeriod10Msec_Z", "U16Z8TimePeriod", 203, 3),
    TimePeriod100MsecZ => ("DPT_TimePeriod100Msec_Z", "U16Z8TimePeriod", 203, 4),
    TimePeriodSecZ => ("DPT_TimePeriodSec_Z", "U16Z8TimePeriod", 203, 5),
    TimePeriodMinZ => ("DPT_TimePeriodMin_Z", "U16Z8TimePeriod", 203, 6),
    TimePeriodHrsZ => ("DPT_TimePeriodHrs_Z", "U16Z8TimePeriod", 203, 7),
    UFlowRateLiterHZ => ("DPT_UFlowRateLiter_h_Z", "U16Z8FlowRate", 203, 11),
    UCountValue16Z => ("DPT_UCountValue16_Z", "U16Z8Counter", 203, 12),
    UElCurrentyAZ => ("DPT_UElCurrentyA_Z", "U16Z8ElectricCurrent", 203, 13),
    PowerKWZ => ("DPT_PowerKW_Z", "U16Z8Power", 203, 14),
    AtmPressureAbsZ => ("DPT_AtmPressureAbs_Z", "U16Z8AtmPressure", 203, 15),
    PercentU16Z => ("DPT_PercentU16_Z", "U16Z8PercentValue", 203, 17),
    HVACAirQualZ => ("DPT_HVACAirQual_Z", "U16Z8HvacAirQuality", 203, 100),
    WindSpeedZDPTWindSpeed => ("DPT_WindSpeed_Z_DPT_WindSpeed", "U16Z8WindSpeed", 203, 101),
    SunIntensityZ => ("DPT_SunIntensity_Z", "U16Z8SunIntensity", 203, 102),
    HVACAirFlowAbsZ => ("DPT_HVACAirFlowAbs_Z", "U16Z8HvacAirFlow", 203, 104),
    RelSignedValueZ => ("DPT_RelSignedValue_Z", "V8Z8RelSignedValue", 204, 1),
    DeltaTimeMsecZ => ("DPT_DeltaTimeMsec_Z", "V16Z8DeltaTime", 205, 2),
    DeltaTime10MsecZ => ("DPT_DeltaTime10Msec_Z", "V16Z8DeltaTime", 205, 3),
    DeltaTime100MsecZ => ("DPT_DeltaTime100Msec_Z", "V16Z8DeltaTime", 205, 4),
    DeltaTimeSecZ => ("DPT_DeltaTimeSec_Z", "V16Z8DeltaTime", 205, 5),
    DeltaTimeMinZ => ("DPT_DeltaTimeMin_Z", "V16Z8DeltaTime", 205, 6),
    DeltaTimeHrsZ => ("DPT_DeltaTimeHrs_Z", "V16Z8DeltaTime", 205, 7),
    PercentV16Z => ("DPT_Percent_V16_Z", "V16Z8RelSignedValue", 205, 17),
    TempHVACAbsZ => ("DPT_TempHVACAbs_Z", "V16Z8RelSignedValue", 205, 100),
    TempHVACRelZ => ("DPT_TempHVACRel_Z", "V16Z8RelSignedValue", 205, 101),
    HVACAirFlowRelZ => ("DPT_HVACAirFlowRel_Z", "V16Z8RelSignedValue", 205, 102),
    HVACModeNext => ("DPT_HVACModeNext", "U16N8HvacModeAndTimeDelay", 206, 100),
    DHWModeNext => ("DPT_DHWModeNext", "U16N8DhwModeAndTimeDelay", 206, 102),
    OccModeNext => ("DPT_OccModeNext", "U16N8OccupancyModeAndTimeDelay", 206, 104),
    BuildingModeNext => ("DPT_BuildingModeNext", "U16N8BuildingModeAndTimeDelay", 206, 105),
    StatusBUC => ("DPT_StatusBUC", "U8B8StatusBurnerController", 207, 100),
    LockSign => ("DPT_LockSign", "U8B8LockingSignal", 207, 101),
    ValueDemBOC => ("DPT_ValueDemBOC", "U8B8BoilerControllerDemandSignal", 207, 102),
    ActPosDemAbs => ("DPT_ActPosDemAbs", "U8B8ActuatorPositionDemand", 207, 104),
    StatusAct => ("DPT_StatusAct", "U8B8ActuatorPositionStatus", 207, 105),
    StatusLightingActuator => ("DPT_StatusLightingActuator", "U8B8StatusLightingActuator", 207, 600),
    StatusHPM => ("DPT_StatusHPM", "V16B8HeatProducerManagerStatus", 209, 100),
    TempRoomDemAbs => ("DPT_TempRoomDemAbs", "V16B8RoomTemperatureDemand", 209, 101),
    StatusCPM => ("DPT_StatusCPM", "V16B8ColdWaterProducerManagerStatus", 209, 102),
    StatusWTC => ("DPT_StatusWTC", "V16B8WaterTemperatureControllerStatus", 209, 103),
    TempFlowWaterDemAbs => ("DPT_TempFlowWaterDemAbs", "V16B16", 210, 100),
    EnergyDemWater => ("DPT_EnergyDemWater", "U8N8", 211, 100),
    TempRoomSetpSetShift3 => ("DPT_TempRoomSetpSetShift3", "V16V16V16RoomTemperatureShift", 212, 100),
    TempRoomSetpSet3 => ("DPT_TempRoomSetpSet3", "V16V16V16RoomTemperature", 212, 101),
    TempRoomSetpSet4 => ("DPT_TempRoomSetpSet4", "V16V16V16V16RoomTemperature", 213, 100),
    TempDHWSetpSet4 => ("DPT_TempDHWSetpSet4", "V16V16V16V16DhwtTemperature", 213, 101),
    TempRoomSetpSetShift4 => ("DPT_TempRoomSetpSetShift4", "V16V16V16V16RoomTemperatureShift", 213, 102),
    PowerFlowWaterDemHPM => ("DPT_PowerFlowWaterDemHPM", "V16U8B8Heat", 214, 100),
    PowerFlowWaterDemCPM => ("DPT_PowerFlowWaterDemCPM", "V16U8B8ChilledWater", 214, 101),
    StatusBOC => ("DPT_StatusBOC", "V16U8B16Boiler", 215, 100),
    StatusCC => ("DPT_StatusCC", "V16U8B16Chiller", 215, 101),
    SpecHeatProd => ("DPT_SpecHeatProd", "U16U8N8B8", 216, 100),
    Version => ("DPT_Version", "U5U5U6", 217, 1),
    VolumeLiterZ => ("DPT_VolumeLiter_Z", "V32Z8VolumeLiter", 218, 1),
    FlowRateM3hZ => ("DPT_FlowRate_m3h_Z", "V32Z8FlowRate", 218, 2),
    AlarmInfo => ("DPT_AlarmInfo", "U8N8N8N8B8B8", 219, 1),
    TempHVACAbsNext => ("DPT_TempHVACAbsNext", "U16V16", 220, 100),
    SerNum => ("DPT_SerNum", "N16U32", 221, 1),
    TempRoomSetpSetF163 => ("DPT_TempRoomSetpSetF163", "F16F16F16", 222, 100),
    TempRoomSetpSetShiftF163 => ("DPT_TempRoomSetpSetShiftF163", "F16F16F16", 222, 101),
    EnergyDemAir => ("DPT_EnergyDemAir", "V8N8N8", 223, 100),
    TempSupplyAirSetpSet => ("DPT_TempSupply_AirSetpSet", "V16V16N8N8", 224, 100),
    ScalingSpeed => ("DPT_ScalingSpeed", "U16U8Scaling", 225, 1),
    ScalingStepTime => ("DPT_Scaling_Step_Time", "U16U8Scaling", 225, 2),
    TariffNext => ("DPT_TariffNext", "U16U8TariffNext", 225, 3),
    MeteringValue => ("DPT_MeteringValue", "V32N8Z8", 229, 1),
    MBusAddress => ("DPT_MBus_Address", "U16U32U8N8", 230, 1000),
    LocaleASCII => ("DPT_Locale_ASCII", "A8A8A8A8", 231, 1),
    ColourRGB => ("DPT_Colour_RGB", "U8U8U8", 232, 600),
    LanguageCodeAlpha2ASCII => ("DPT_LanguageCodeAlpha2_ASCII", "A8A8Language", 234, 1),
    RegionCodeAlpha2ASCII => ("DPT_RegionCodeAlpha2_ASCII", "A8A8Region", 234, 2),
    TariffActiveEnergy => ("DPT_Tariff_ActiveEnergy", "V32U8B8", 235, 1),
    PrioritisedModeControl => ("DPT_Prioritised_Mode_Control", "B1N3N4", 236, 1),
    DALIControlGearDiagnostic => ("DPT_DALI_Control_Gear_Diagnostic", "B10U6", 237, 600),
    SceneConfig => ("DPT_SceneConfig", "B2U6", 238, 1),
    DALIDiagnostics => ("DPT_DALI_Diagnostics", "B2U6", 238, 600),
    FlaggedScaling => ("DPT_FlaggedScaling", "U8r7B1", 239, 1),
    CombinedPosition => ("DPT_CombinedPosition", "U8U8B8", 240, 800),
    StatusSAB => ("DPT_StatusSAB", "U8U8B16", 241, 800),
}

impl DatapointType {
    /// Find a datapoint type by its symbolic name, e.g. `DPT_Value_Temp`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|dpt| dpt.name() == name)
    }

    /// Find a datapoint type by main and sub number.
    pub fn from_numbers(main: u16, sub: u16) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|dpt| dpt.main_number() == main && dpt.sub_number() == sub)
    }

    /// Parse an id of the form `main.sub`, e.g. `9.001` or `9.1`.
    pub fn from_id(id: &str) -> Option<Self> {
        let (main, sub) = id.split_once('.')?;
        Self::from_numbers(main.parse().ok()?, sub.parse().ok()?)
    }

    /// The `main.sub` id with a three digit sub number, e.g. `9.001`.
    pub fn id(self) -> heapless::String<ID_CAPACITY> {
        let mut id = heapless::String::new();
        // Two u16 and a dot always fit.
        let _ = write!(id, "{self}");
        id
    }
}

impl fmt::Display for DatapointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.main_number(), self.sub_number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(DatapointType::ALL.len(), 357);
    }

    #[test]
    fn test_value_temp() {
        let dpt = DatapointType::ValueTemp;
        assert_eq!(dpt.name(), "DPT_Value_Temp");
        assert_eq!(dpt.format_name(), "F16");
        assert_eq!(dpt.main_number(), 9);
        assert_eq!(dpt.sub_number(), 1);
        assert_eq!(dpt.id().as_str(), "9.001");
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(DatapointType::from_name("DPT_Switch"), Some(DatapointType::Switch));
        assert_eq!(DatapointType::from_name("DPT_TimeOfDay"), Some(DatapointType::TimeOfDay));
        assert_eq!(DatapointType::from_name("DPT_Nonexistent"), None);
    }

    #[test]
    fn test_lookup_by_numbers() {
        assert_eq!(DatapointType::from_numbers(1, 1), Some(DatapointType::Switch));
        assert_eq!(DatapointType::from_numbers(14, 0), Some(DatapointType::ValueAcceleration));
        assert_eq!(DatapointType::from_numbers(9999, 1), None);
    }

    #[test]
    fn test_lookup_by_id() {
        assert_eq!(DatapointType::from_id("9.001"), Some(DatapointType::ValueTemp));
        assert_eq!(DatapointType::from_id("9.1"), Some(DatapointType::ValueTemp));
        assert_eq!(DatapointType::from_id("9"), None);
        assert_eq!(DatapointType::from_id("a.b"), None);
    }

    #[test]
    fn test_display_pads_sub_number() {
        assert_eq!(DatapointType::ValueAcceleration.id().as_str(), "14.000");
        assert_eq!(DatapointType::Value4Ucount.id().as_str(), "12.001");
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in DatapointType::ALL.iter().enumerate() {
            for b in &DatapointType::ALL[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_every_entry_resolves_by_name() {
        for dpt in DatapointType::ALL {
            assert_eq!(DatapointType::from_name(dpt.name()), Some(*dpt));
        }
    }
}
